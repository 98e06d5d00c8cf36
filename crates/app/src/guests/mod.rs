//! Guests

mod service;

pub use guestgate::gate::{AddGuestError, GateStats, GuestView, NewGuest, ValidationView};
pub use service::*;

//! Admissions

mod service;

pub use guestgate::{
    gate::{Admission, EntryConfirmation, TokenLookup, ValidationError, ValidationRequest},
    ledger::{EntryError, EntryMethod},
};
pub use service::*;

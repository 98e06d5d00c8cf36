//! Guestgate
//!
//! Guestgate is the admission core for a one-time event: a static guest roster, a single-use
//! admission ledger, and the state machine that turns a phone number into an entry token.

pub mod collation;
pub mod gate;
pub mod ledger;
pub mod phones;
pub mod prelude;
pub mod roster;
pub mod tokens;

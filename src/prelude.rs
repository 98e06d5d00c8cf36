//! Guestgate prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    collation::{collation_key, compare_names},
    gate::{
        AddGuestError, Admission, EntryConfirmation, Gate, GateStats, GuestView, NewGuest,
        TokenLookup, ValidationError, ValidationRequest, ValidationView,
    },
    ledger::{
        AdmissionLedger, AdmissionRecord, AdmitError, AlreadyValidated, Entry, EntryError,
        EntryMethod,
    },
    phones::{Phone, PhoneError},
    roster::{DuplicatePhone, GuestRecord, Roster, RosterError},
    tokens::{SecondaryToken, TokenFormat, TokenGenerator, TokenSet, UnknownTokenFormat},
};

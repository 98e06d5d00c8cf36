//! Admission ledger
//!
//! Runtime record of every phone that passed validation. A phone is admitted
//! at most once, and an admission moves from validated to entered at most
//! once. Nothing is ever removed.

use std::fmt;

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    phones::Phone,
    tokens::{SecondaryToken, TokenSet},
};

/// The phone already holds an admission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("phone was already validated for {name} at {validated_at}")]
pub struct AlreadyValidated {
    /// Name on the existing admission
    pub name: String,

    /// When the existing admission was granted
    pub validated_at: Timestamp,

    /// Token issued with the existing admission
    pub token: SecondaryToken,
}

/// Admission rejections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmitError {
    /// The phone already holds an admission.
    #[error(transparent)]
    AlreadyValidated(#[from] AlreadyValidated),

    /// Another admission already carries the token.
    #[error("token is already issued")]
    TokenInUse,
}

/// Entry confirmation rejections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// No token was supplied.
    #[error("token is required")]
    MissingToken,

    /// No admission carries this token.
    #[error("token not found")]
    TokenNotFound,

    /// The admission was already used at the door.
    #[error("{name} already entered at {entered_at}")]
    AlreadyEntered {
        /// Guest name on the admission
        name: String,

        /// When entry was first confirmed
        entered_at: Timestamp,
    },
}

/// How physical entry was confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryMethod {
    /// Door staff typed or scanned the guest's code.
    DoorCode,

    /// An admin opened the guest's validation link.
    AdminLink,
}

impl EntryMethod {
    /// Stable identifier for audit output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DoorCode => "DoorCode",
            Self::AdminLink => "AdminLink",
        }
    }
}

impl fmt::Display for EntryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confirmed physical entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// When entry was confirmed
    pub at: Timestamp,

    /// Who or what confirmed it
    pub by: EntryMethod,
}

/// A single admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionRecord {
    /// Guest name, copied from the roster at validation time
    pub name: String,

    /// Ticket count, copied from the roster at validation time
    pub ticket_count: u32,

    /// When the phone was validated
    pub validated_at: Timestamp,

    /// Network origin of the validating request, for audit
    pub request_origin: String,

    /// Proof of admission for door staff
    pub token: SecondaryToken,

    /// Guest asked for newsletter updates
    pub newsletter_opt_in: bool,

    /// Set once, when entry is confirmed
    pub entry: Option<Entry>,
}

impl AdmissionRecord {
    /// Whether the guest has physically entered.
    pub fn is_entered(&self) -> bool {
        self.entry.is_some()
    }

    /// Entry time, if entered.
    pub fn entered_at(&self) -> Option<Timestamp> {
        self.entry.map(|entry| entry.at)
    }

    /// Entry method, if entered.
    pub fn entered_by(&self) -> Option<EntryMethod> {
        self.entry.map(|entry| entry.by)
    }
}

/// Phone-keyed admissions with a token index.
#[derive(Debug, Clone, Default)]
pub struct AdmissionLedger {
    records: FxHashMap<Phone, AdmissionRecord>,
    tokens: FxHashMap<SecondaryToken, Phone>,
}

impl AdmissionLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an admission for `phone`.
    ///
    /// # Errors
    ///
    /// Returns [`AdmitError::AlreadyValidated`] describing the existing
    /// admission if the phone was admitted before, and
    /// [`AdmitError::TokenInUse`] if another admission carries the token. The
    /// ledger is unchanged in both cases.
    pub fn admit(
        &mut self,
        phone: Phone,
        record: AdmissionRecord,
    ) -> Result<&AdmissionRecord, AdmitError> {
        if let Some(existing) = self.records.get(&phone) {
            return Err(AlreadyValidated::from(existing).into());
        }

        if self.tokens.contains_key(&record.token) {
            return Err(AdmitError::TokenInUse);
        }

        self.tokens.insert(record.token.clone(), phone.clone());

        Ok(self.records.entry(phone).or_insert(record))
    }

    /// Flip the admission carrying `token` to entered.
    ///
    /// # Errors
    ///
    /// Returns an [`EntryError`] when the token is empty, unknown, or was
    /// already used. The ledger is unchanged in those cases.
    pub fn confirm_entry(
        &mut self,
        token: &str,
        method: EntryMethod,
        now: Timestamp,
    ) -> Result<&AdmissionRecord, EntryError> {
        let token = token.trim();

        if token.is_empty() {
            return Err(EntryError::MissingToken);
        }

        let record = self
            .tokens
            .get(&SecondaryToken::new(token))
            .and_then(|phone| self.records.get_mut(phone))
            .ok_or(EntryError::TokenNotFound)?;

        if let Some(entry) = record.entry {
            return Err(EntryError::AlreadyEntered {
                name: record.name.clone(),
                entered_at: entry.at,
            });
        }

        record.entry = Some(Entry { at: now, by: method });

        Ok(record)
    }

    /// Existing admission for `phone`.
    pub fn get(&self, phone: &Phone) -> Option<&AdmissionRecord> {
        self.records.get(phone)
    }

    /// Whether `phone` has been validated.
    pub fn contains(&self, phone: &Phone) -> bool {
        self.records.contains_key(phone)
    }

    /// Admission carrying `token`, with its phone.
    pub fn find_by_token(&self, token: &str) -> Option<(&Phone, &AdmissionRecord)> {
        let phone = self.tokens.get(&SecondaryToken::new(token.trim()))?;

        self.records.get_key_value(phone)
    }

    /// Number of admissions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been admitted yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over admissions in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Phone, &AdmissionRecord)> {
        self.records.iter()
    }
}

impl TokenSet for AdmissionLedger {
    fn contains_token(&self, token: &str) -> bool {
        self.tokens.contains_key(&SecondaryToken::new(token))
    }
}

impl From<&AdmissionRecord> for AlreadyValidated {
    fn from(record: &AdmissionRecord) -> Self {
        Self {
            name: record.name.clone(),
            validated_at: record.validated_at,
            token: record.token.clone(),
        }
    }
}

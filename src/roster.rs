//! Roster
//!
//! The static guest list: who is invited and how many tickets each guest holds.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::phones::{Phone, PhoneError};

/// Roster errors
#[derive(Debug, Error)]
pub enum RosterError {
    /// A roster key is not a valid phone number.
    #[error("invalid roster phone {raw:?}: {source}")]
    InvalidPhone {
        /// The key as written in the roster source
        raw: String,

        /// Why the key was rejected
        source: PhoneError,
    },

    /// Two entries share a phone number.
    #[error(transparent)]
    DuplicatePhone(#[from] DuplicatePhone),

    /// The roster source could not be parsed.
    #[error("failed to parse roster: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// The phone number is already on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("phone {0} is already on the roster")]
pub struct DuplicatePhone(pub Phone);

/// A single invited guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    /// Guest display name
    pub name: String,

    /// Number of tickets allotted to the guest
    #[serde(rename = "tickets")]
    pub ticket_count: u32,

    /// Admin-recorded newsletter interest
    #[serde(default, rename = "newsletter")]
    pub newsletter_opt_in: bool,
}

impl GuestRecord {
    /// Create a guest record without newsletter interest.
    pub fn new(name: impl Into<String>, ticket_count: u32) -> Self {
        Self {
            name: name.into(),
            ticket_count,
            newsletter_opt_in: false,
        }
    }

    /// Whether this guest can be admitted at all.
    pub fn has_tickets(&self) -> bool {
        self.ticket_count > 0
    }
}

/// Phone-keyed guest list. Entries are only ever added.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    guests: FxHashMap<Phone, GuestRecord>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a roster from a YAML (or JSON) mapping of phone to guest.
    ///
    /// ```yaml
    /// "050-123-4567": { name: Dana, tickets: 2 }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed, a key is not a
    /// valid phone number, or two keys normalize to the same number.
    pub fn from_yaml_str(source: &str) -> Result<Self, RosterError> {
        let raw: FxHashMap<String, GuestRecord> = serde_norway::from_str(source)?;

        let mut roster = Self::new();

        for (key, record) in raw {
            let phone = Phone::parse(&key).map_err(|source| RosterError::InvalidPhone {
                raw: key.clone(),
                source,
            })?;

            roster.insert(phone, record)?;
        }

        Ok(roster)
    }

    /// Add a guest.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicatePhone`] if the phone is already a key; the existing
    /// entry is left untouched.
    pub fn insert(&mut self, phone: Phone, record: GuestRecord) -> Result<(), DuplicatePhone> {
        if self.guests.contains_key(&phone) {
            return Err(DuplicatePhone(phone));
        }

        self.guests.insert(phone, record);

        Ok(())
    }

    /// Look up a guest by phone.
    pub fn get(&self, phone: &Phone) -> Option<&GuestRecord> {
        self.guests.get(phone)
    }

    /// Look up a guest that holds at least one ticket.
    pub fn eligible(&self, phone: &Phone) -> Option<&GuestRecord> {
        self.get(phone).filter(|guest| guest.has_tickets())
    }

    /// Whether the phone is on the roster.
    pub fn contains(&self, phone: &Phone) -> bool {
        self.guests.contains_key(phone)
    }

    /// Number of guests.
    pub fn len(&self) -> usize {
        self.guests.len()
    }

    /// Whether the roster has no guests.
    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    /// Sum of all allotted tickets.
    pub fn total_tickets(&self) -> u64 {
        self.guests
            .values()
            .map(|guest| u64::from(guest.ticket_count))
            .sum()
    }

    /// Iterate over all guests in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Phone, &GuestRecord)> {
        self.guests.iter()
    }
}

impl FromIterator<(Phone, GuestRecord)> for Roster {
    /// Later duplicates are ignored.
    fn from_iter<I: IntoIterator<Item = (Phone, GuestRecord)>>(iter: I) -> Self {
        let mut roster = Self::new();

        for (phone, record) in iter {
            roster.guests.entry(phone).or_insert(record);
        }

        roster
    }
}

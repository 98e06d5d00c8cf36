//! Gate
//!
//! The admission state machine. Per phone:
//!
//! ```text
//! UNKNOWN --validate--> VALIDATED --confirm_entry--> ENTERED
//! UNKNOWN --validate (not on roster / no tickets)--> rejected, nothing recorded
//! ```
//!
//! Validating a validated phone and confirming an entered token are rejected
//! without touching state. No transition leads back.

use jiff::Timestamp;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::{
    collation::compare_names,
    ledger::{
        AdmissionLedger, AdmissionRecord, AdmitError, AlreadyValidated, EntryError, EntryMethod,
    },
    phones::{Phone, PhoneError},
    roster::{DuplicatePhone, GuestRecord, Roster},
    tokens::{SecondaryToken, TokenGenerator},
};

/// Validation rejections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The phone number is malformed.
    #[error("invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),

    /// The phone already holds an admission.
    #[error(transparent)]
    AlreadyValidated(#[from] AlreadyValidated),

    /// The phone is not on the roster, or holds no tickets.
    #[error("phone is not on the guest list")]
    NotOnRoster,

    /// No unused token could be issued. Nothing was recorded.
    #[error("no unused token could be issued")]
    TokenUnavailable,
}

/// Admin guest insertion rejections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddGuestError {
    /// The phone number is malformed.
    #[error("invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),

    /// The guest name is blank.
    #[error("guest name is required")]
    MissingName,

    /// The phone is already on the roster.
    #[error("phone {0} is already on the roster")]
    DuplicatePhone(Phone),
}

/// Context of a validation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationRequest {
    /// Network origin of the caller
    pub origin: String,

    /// Guest asked for newsletter updates
    pub newsletter_opt_in: bool,
}

/// Successful validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Admission {
    /// Guest name
    pub name: String,

    /// Tickets admitted
    pub ticket_count: u32,

    /// Token for door staff
    pub token: SecondaryToken,
}

/// Successful entry confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryConfirmation {
    /// Guest name
    pub name: String,

    /// Tickets admitted
    pub ticket_count: u32,
}

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GateStats {
    /// Guests on the roster
    pub total_guests: usize,

    /// Phones validated
    pub validated_count: usize,

    /// Validated guests confirmed at the door
    pub entered_count: usize,

    /// Tickets allotted across the roster
    pub total_tickets: u64,

    /// Tickets held by validated guests
    pub validated_tickets: u64,
}

/// Masked admission for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationView {
    /// Masked phone
    pub phone: String,

    /// The admission itself
    pub record: AdmissionRecord,
}

/// Roster entry joined with its admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestView {
    /// Masked phone, safe to display
    pub phone: String,

    /// Unmasked phone, for privileged admin views only
    pub real_phone: Phone,

    /// Guest name
    pub name: String,

    /// Allotted tickets
    pub ticket_count: u32,

    /// Admin-recorded newsletter interest
    pub newsletter_opt_in: bool,

    /// Admission, if validated
    pub admission: Option<AdmissionRecord>,
}

impl GuestView {
    /// Whether the guest has validated their phone.
    pub fn is_validated(&self) -> bool {
        self.admission.is_some()
    }

    /// Whether the guest has physically entered.
    pub fn is_entered(&self) -> bool {
        self.admission
            .as_ref()
            .is_some_and(AdmissionRecord::is_entered)
    }
}

/// Read-only resolution of a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenLookup {
    /// Masked phone
    pub phone: String,

    /// The admission carrying the token
    pub record: AdmissionRecord,
}

/// New roster entry from an admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuest {
    /// Guest name
    pub name: String,

    /// Raw phone, normalized on insert
    pub phone: String,

    /// Tickets to allot
    pub ticket_count: u32,

    /// Admin-recorded newsletter interest
    pub newsletter_opt_in: bool,
}

/// Roster, ledger and token generator for one event.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    roster: Roster,
    ledger: AdmissionLedger,
    generator: TokenGenerator,
}

impl Gate {
    /// Create a gate with an empty ledger.
    pub fn new(roster: Roster, generator: TokenGenerator) -> Self {
        Self {
            roster,
            ledger: AdmissionLedger::new(),
            generator,
        }
    }

    /// The roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The ledger.
    pub fn ledger(&self) -> &AdmissionLedger {
        &self.ledger
    }

    /// Validate a phone and issue an admission.
    ///
    /// Checks run in order: phone format, existing admission, roster
    /// eligibility. Exactly one ledger insert happens on success and none on
    /// any rejection.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the rejection.
    pub fn validate(
        &mut self,
        raw_phone: &str,
        request: ValidationRequest,
        now: Timestamp,
    ) -> Result<Admission, ValidationError> {
        let phone = Phone::parse(raw_phone)?;

        if let Some(existing) = self.ledger.get(&phone) {
            debug!(phone = %phone.masked(), "phone already validated");

            return Err(AlreadyValidated::from(existing).into());
        }

        let guest = self
            .roster
            .eligible(&phone)
            .ok_or(ValidationError::NotOnRoster)?;

        let token = self.generator.generate(&self.ledger, now);

        let record = AdmissionRecord {
            name: guest.name.clone(),
            ticket_count: guest.ticket_count,
            validated_at: now,
            request_origin: request.origin,
            token,
            newsletter_opt_in: request.newsletter_opt_in || guest.newsletter_opt_in,
            entry: None,
        };

        let masked = phone.masked();
        let admitted = self.ledger.admit(phone, record).map_err(|error| match error {
            AdmitError::AlreadyValidated(existing) => ValidationError::AlreadyValidated(existing),
            AdmitError::TokenInUse => {
                error!(phone = %masked, "generated token is already issued");

                ValidationError::TokenUnavailable
            }
        })?;

        info!(
            phone = %masked,
            tickets = admitted.ticket_count,
            "phone validated"
        );

        Ok(Admission {
            name: admitted.name.clone(),
            ticket_count: admitted.ticket_count,
            token: admitted.token.clone(),
        })
    }

    /// Confirm physical entry for the admission carrying `token`.
    ///
    /// # Errors
    ///
    /// Returns an [`EntryError`] when the token is blank, unknown or used.
    pub fn confirm_entry(
        &mut self,
        token: &str,
        method: EntryMethod,
        now: Timestamp,
    ) -> Result<EntryConfirmation, EntryError> {
        let record = self.ledger.confirm_entry(token, method, now)?;

        info!(method = %method, tickets = record.ticket_count, "entry confirmed");

        Ok(EntryConfirmation {
            name: record.name.clone(),
            ticket_count: record.ticket_count,
        })
    }

    /// Resolve a token without changing anything.
    pub fn lookup_token(&self, token: &str) -> Option<TokenLookup> {
        self.ledger
            .find_by_token(token)
            .map(|(phone, record)| TokenLookup {
                phone: phone.masked(),
                record: record.clone(),
            })
    }

    /// Aggregate counts.
    pub fn stats(&self) -> GateStats {
        let (entered_count, validated_tickets) = self.ledger.iter().fold(
            (0, 0_u64),
            |(entered, tickets), (_, record)| {
                (
                    entered + usize::from(record.is_entered()),
                    tickets + u64::from(record.ticket_count),
                )
            },
        );

        GateStats {
            total_guests: self.roster.len(),
            validated_count: self.ledger.len(),
            entered_count,
            total_tickets: self.roster.total_tickets(),
            validated_tickets,
        }
    }

    /// All admissions, masked, newest first.
    pub fn validations(&self) -> Vec<ValidationView> {
        let mut views: Vec<ValidationView> = self
            .ledger
            .iter()
            .map(|(phone, record)| ValidationView {
                phone: phone.masked(),
                record: record.clone(),
            })
            .collect();

        views.sort_by(|a, b| {
            b.record
                .validated_at
                .cmp(&a.record.validated_at)
                .then_with(|| a.phone.cmp(&b.phone))
        });

        views
    }

    /// Roster joined with admissions, sorted by name.
    pub fn guests(&self) -> Vec<GuestView> {
        let mut views: Vec<GuestView> = self
            .roster
            .iter()
            .map(|(phone, guest)| GuestView {
                phone: phone.masked(),
                real_phone: phone.clone(),
                name: guest.name.clone(),
                ticket_count: guest.ticket_count,
                newsletter_opt_in: guest.newsletter_opt_in,
                admission: self.ledger.get(phone).cloned(),
            })
            .collect();

        views.sort_by(|a, b| {
            compare_names(&a.name, &b.name).then_with(|| a.real_phone.cmp(&b.real_phone))
        });

        views
    }

    /// Add a guest to the roster.
    ///
    /// The newsletter flag is stored on the roster entry; no admission is
    /// created, so the guest can still validate normally.
    ///
    /// # Errors
    ///
    /// Returns an [`AddGuestError`] for a malformed phone, a blank name, or a
    /// phone that is already on the roster.
    pub fn add_guest(&mut self, guest: NewGuest) -> Result<(Phone, GuestRecord), AddGuestError> {
        let phone = Phone::parse(&guest.phone)?;
        let name = guest.name.trim();

        if name.is_empty() {
            return Err(AddGuestError::MissingName);
        }

        let record = GuestRecord {
            name: name.to_string(),
            ticket_count: guest.ticket_count,
            newsletter_opt_in: guest.newsletter_opt_in,
        };

        self.roster
            .insert(phone.clone(), record.clone())
            .map_err(|DuplicatePhone(phone)| AddGuestError::DuplicatePhone(phone))?;

        info!(phone = %phone.masked(), tickets = record.ticket_count, "guest added");

        Ok((phone, record))
    }
}

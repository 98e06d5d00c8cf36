//! Guests service.

use async_trait::async_trait;
use guestgate::{phones::Phone, roster::GuestRecord};
use mockall::automock;

use crate::{
    gate::SharedGate,
    guests::{AddGuestError, GateStats, GuestView, NewGuest, ValidationView},
};

#[derive(Debug, Clone)]
pub struct InMemoryGuestsService {
    gate: SharedGate,
}

impl InMemoryGuestsService {
    #[must_use]
    pub fn new(gate: SharedGate) -> Self {
        Self { gate }
    }
}

#[async_trait]
impl GuestsService for InMemoryGuestsService {
    async fn stats(&self) -> GateStats {
        self.gate.read().await.stats()
    }

    async fn list_validations(&self) -> Vec<ValidationView> {
        self.gate.read().await.validations()
    }

    async fn list_guests(&self) -> Vec<GuestView> {
        self.gate.read().await.guests()
    }

    async fn add_guest(&self, guest: NewGuest) -> Result<(Phone, GuestRecord), AddGuestError> {
        self.gate.write().await.add_guest(guest)
    }
}

#[automock]
#[async_trait]
/// Admin views over the roster and ledger.
pub trait GuestsService: Send + Sync {
    /// Aggregate roster and ledger counts.
    async fn stats(&self) -> GateStats;

    /// Every admission, newest first, with masked phones.
    async fn list_validations(&self) -> Vec<ValidationView>;

    /// Every roster entry joined with its admission, sorted by name.
    async fn list_guests(&self) -> Vec<GuestView>;

    /// Add a guest to the roster.
    async fn add_guest(&self, guest: NewGuest) -> Result<(Phone, GuestRecord), AddGuestError>;
}

#[cfg(test)]
mod tests {
    use guestgate::gate::ValidationRequest;
    use testresult::TestResult;

    use crate::{
        admissions::{AdmissionsService, EntryMethod},
        test::{DANA, NOA, TestContext},
    };

    use super::*;

    fn new_guest(name: &str, phone: &str, tickets: u32) -> NewGuest {
        NewGuest {
            name: name.to_string(),
            phone: phone.to_string(),
            ticket_count: tickets,
            newsletter_opt_in: false,
        }
    }

    #[tokio::test]
    async fn stats_track_validations_and_entries() -> TestResult {
        let ctx = TestContext::new()?;

        let stats = ctx.guests.stats().await;

        assert_eq!(stats.total_guests, 3);
        assert_eq!(stats.total_tickets, 3);
        assert_eq!(stats.validated_count, 0);

        let admission = ctx
            .admissions
            .validate(DANA, ValidationRequest::default())
            .await?;
        ctx.admissions.validate(NOA, ValidationRequest::default()).await?;
        ctx.admissions
            .confirm_entry(admission.token.as_str(), EntryMethod::DoorCode)
            .await?;

        let stats = ctx.guests.stats().await;

        assert_eq!(stats.validated_count, 2);
        assert_eq!(stats.validated_tickets, 3);
        assert_eq!(stats.entered_count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn list_validations_masks_phones() -> TestResult {
        let ctx = TestContext::new()?;

        ctx.admissions
            .validate(DANA, ValidationRequest::default())
            .await?;

        let validations = ctx.guests.list_validations().await;

        assert_eq!(validations.len(), 1);
        assert_eq!(
            validations.first().map(|view| view.phone.as_str()),
            Some("050****567")
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_guests_joins_admissions() -> TestResult {
        let ctx = TestContext::new()?;

        ctx.admissions
            .validate(DANA, ValidationRequest::default())
            .await?;

        let guests = ctx.guests.list_guests().await;
        let names: Vec<&str> = guests.iter().map(|guest| guest.name.as_str()).collect();

        assert_eq!(names, vec!["Dana", "Noa", "Zero"]);
        assert!(guests.first().is_some_and(GuestView::is_validated));
        assert!(guests.iter().skip(1).all(|guest| !guest.is_validated()));

        Ok(())
    }

    #[tokio::test]
    async fn add_guest_can_then_validate() -> TestResult {
        let ctx = TestContext::new()?;

        let (phone, record) = ctx
            .guests
            .add_guest(new_guest(" Tamar ", "054-111-2222", 3))
            .await?;

        assert_eq!(phone.as_str(), "0541112222");
        assert_eq!(record.name, "Tamar");

        let admission = ctx
            .admissions
            .validate("0541112222", ValidationRequest::default())
            .await?;

        assert_eq!(admission.ticket_count, 3);

        Ok(())
    }

    #[tokio::test]
    async fn add_guest_rejects_duplicate_phone() -> TestResult {
        let ctx = TestContext::new()?;

        let result = ctx.guests.add_guest(new_guest("Other", DANA, 1)).await;

        assert!(
            matches!(result, Err(AddGuestError::DuplicatePhone(_))),
            "expected DuplicatePhone, got {result:?}"
        );
        assert_eq!(ctx.guests.stats().await.total_guests, 3);

        Ok(())
    }

    #[tokio::test]
    async fn add_guest_with_newsletter_does_not_validate() -> TestResult {
        let ctx = TestContext::new()?;

        ctx.guests
            .add_guest(NewGuest {
                newsletter_opt_in: true,
                ..new_guest("Tamar", "0541112222", 1)
            })
            .await?;

        assert_eq!(ctx.guests.stats().await.validated_count, 0);

        Ok(())
    }
}

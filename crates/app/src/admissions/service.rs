//! Admissions service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    admissions::{
        Admission, EntryConfirmation, EntryError, EntryMethod, TokenLookup, ValidationError,
        ValidationRequest,
    },
    gate::SharedGate,
};

#[derive(Debug, Clone)]
pub struct InMemoryAdmissionsService {
    gate: SharedGate,
}

impl InMemoryAdmissionsService {
    #[must_use]
    pub fn new(gate: SharedGate) -> Self {
        Self { gate }
    }
}

#[async_trait]
impl AdmissionsService for InMemoryAdmissionsService {
    async fn validate(
        &self,
        phone: &str,
        request: ValidationRequest,
    ) -> Result<Admission, ValidationError> {
        self.gate
            .write()
            .await
            .validate(phone, request, Timestamp::now())
    }

    async fn confirm_entry(
        &self,
        token: &str,
        method: EntryMethod,
    ) -> Result<EntryConfirmation, EntryError> {
        self.gate
            .write()
            .await
            .confirm_entry(token, method, Timestamp::now())
    }

    async fn lookup_token(&self, token: &str) -> Option<TokenLookup> {
        self.gate.read().await.lookup_token(token)
    }
}

#[automock]
#[async_trait]
/// Phone validation and door entry.
pub trait AdmissionsService: Send + Sync {
    /// Validate a raw phone number and issue a token.
    async fn validate(
        &self,
        phone: &str,
        request: ValidationRequest,
    ) -> Result<Admission, ValidationError>;

    /// Mark the admission carrying `token` as entered.
    async fn confirm_entry(
        &self,
        token: &str,
        method: EntryMethod,
    ) -> Result<EntryConfirmation, EntryError>;

    /// Resolve a token without side effects.
    async fn lookup_token(&self, token: &str) -> Option<TokenLookup>;
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use guestgate::{phones::Phone, tokens::TokenFormat};
    use testresult::TestResult;

    use crate::test::{DANA, NOA, TestContext, ZERO};

    use super::*;

    fn request(origin: &str) -> ValidationRequest {
        ValidationRequest {
            origin: origin.to_string(),
            newsletter_opt_in: false,
        }
    }

    #[tokio::test]
    async fn validate_issues_token_and_records_admission() -> TestResult {
        let ctx = TestContext::new()?;

        let before = Timestamp::now();
        let admission = ctx.admissions.validate(DANA, request("10.0.0.1")).await?;
        let after = Timestamp::now();

        assert_eq!(admission.name, "Dana");
        assert_eq!(admission.ticket_count, 2);
        assert_eq!(admission.token.as_str().len(), 6);

        let gate = ctx.gate.read().await;
        let record = gate
            .ledger()
            .get(&Phone::parse(DANA)?)
            .ok_or("admission should be recorded")?;

        assert_eq!(record.request_origin, "10.0.0.1");
        assert!(record.validated_at >= before && record.validated_at <= after);

        Ok(())
    }

    #[tokio::test]
    async fn validate_twice_returns_original_token() -> TestResult {
        let ctx = TestContext::new()?;

        let admission = ctx.admissions.validate(DANA, request("10.0.0.1")).await?;
        let result = ctx.admissions.validate("0501234567", request("10.0.0.2")).await;

        assert!(
            matches!(
                result,
                Err(ValidationError::AlreadyValidated(ref existing))
                    if existing.token == admission.token && existing.name == "Dana"
            ),
            "expected AlreadyValidated, got {result:?}"
        );
        assert_eq!(ctx.gate.read().await.ledger().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn validate_rejects_guest_without_tickets() -> TestResult {
        let ctx = TestContext::new()?;

        let result = ctx.admissions.validate(ZERO, request("10.0.0.1")).await;

        assert!(
            matches!(result, Err(ValidationError::NotOnRoster)),
            "expected NotOnRoster, got {result:?}"
        );
        assert!(ctx.gate.read().await.ledger().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn validate_keeps_roster_newsletter_interest() -> TestResult {
        let ctx = TestContext::new()?;

        ctx.admissions.validate(NOA, request("10.0.0.1")).await?;

        let lookup = ctx
            .gate
            .read()
            .await
            .ledger()
            .get(&Phone::parse(NOA)?)
            .map(|record| record.newsletter_opt_in);

        assert_eq!(lookup, Some(true));

        Ok(())
    }

    #[tokio::test]
    async fn confirm_entry_then_lookup_shows_entered() -> TestResult {
        let ctx = TestContext::new()?;

        let admission = ctx.admissions.validate(DANA, request("10.0.0.1")).await?;

        let confirmation = ctx
            .admissions
            .confirm_entry(admission.token.as_str(), EntryMethod::DoorCode)
            .await?;

        assert_eq!(confirmation.name, "Dana");
        assert_eq!(confirmation.ticket_count, 2);

        let lookup = ctx
            .admissions
            .lookup_token(admission.token.as_str())
            .await
            .ok_or("token should resolve")?;

        assert_eq!(lookup.phone, "050****567");
        assert_eq!(lookup.record.entered_by(), Some(EntryMethod::DoorCode));

        let again = ctx
            .admissions
            .confirm_entry(admission.token.as_str(), EntryMethod::AdminLink)
            .await;

        assert!(
            matches!(again, Err(EntryError::AlreadyEntered { ref name, .. }) if name == "Dana"),
            "expected AlreadyEntered, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn lookup_unknown_token_is_none() -> TestResult {
        let ctx = TestContext::new()?;

        assert!(ctx.admissions.lookup_token("NOPE00").await.is_none());

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_validations_of_one_phone_admit_once() -> TestResult {
        let ctx = TestContext::new()?;

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let admissions = ctx.admissions.clone();

                tokio::spawn(async move {
                    admissions
                        .validate(DANA, request(&format!("10.0.0.{i}")))
                        .await
                })
            })
            .collect();

        let mut admitted = Vec::new();
        let mut rejected = Vec::new();

        for handle in handles {
            match handle.await? {
                Ok(admission) => admitted.push(admission),
                Err(error) => rejected.push(error),
            }
        }

        assert_eq!(admitted.len(), 1, "exactly one request should be admitted");
        assert!(
            rejected
                .iter()
                .all(|error| matches!(error, ValidationError::AlreadyValidated(_))),
            "losers should see AlreadyValidated, got {rejected:?}"
        );
        assert_eq!(ctx.gate.read().await.ledger().len(), 1);

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_confirmations_of_one_token_enter_once() -> TestResult {
        let ctx = TestContext::new()?;
        let admission = ctx.admissions.validate(DANA, request("10.0.0.1")).await?;

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let admissions = ctx.admissions.clone();
                let token = admission.token.clone();

                tokio::spawn(async move {
                    admissions
                        .confirm_entry(token.as_str(), EntryMethod::DoorCode)
                        .await
                })
            })
            .collect();

        let mut entered = 0;

        for handle in handles {
            if handle.await?.is_ok() {
                entered += 1;
            }
        }

        assert_eq!(entered, 1, "exactly one confirmation should succeed");

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_validations_never_share_a_token() -> TestResult {
        let phones: Vec<String> = (0..200).map(|i| format!("05{i:08}")).collect();
        let roster_yaml: String = phones
            .iter()
            .map(|phone| format!("\"{phone}\": {{ name: Guest {phone}, tickets: 1 }}\n"))
            .collect();

        let roster = guestgate::roster::Roster::from_yaml_str(&roster_yaml)?;
        let gate = SharedGate::new(guestgate::gate::Gate::new(
            roster,
            guestgate::tokens::TokenGenerator::new(TokenFormat::Pin4),
        ));
        let admissions = InMemoryAdmissionsService::new(gate);

        let handles: Vec<_> = phones
            .into_iter()
            .map(|phone| {
                let admissions = admissions.clone();

                tokio::spawn(async move { admissions.validate(&phone, request("10.0.0.1")).await })
            })
            .collect();

        let mut tokens = HashSet::new();

        for handle in handles {
            let admission = handle.await??;

            assert!(
                tokens.insert(admission.token.clone()),
                "token {} issued twice",
                admission.token
            );
        }

        assert_eq!(tokens.len(), 200);

        Ok(())
    }
}

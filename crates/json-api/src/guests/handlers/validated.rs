//! Validated Entries Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use guestgate_app::guests::ValidationView;

use crate::extensions::*;

/// A validated phone, masked
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValidatedEntryResponse {
    /// Masked phone, e.g. `050****567`
    pub phone: String,

    pub name: String,

    pub tickets: u32,

    /// RFC 3339
    pub validated_at: String,

    pub request_origin: String,

    /// Door code issued with the admission
    pub token: String,

    pub newsletter: bool,

    pub entered: bool,

    /// RFC 3339, once entered
    pub entry_timestamp: Option<String>,

    /// `DoorCode` or `AdminLink`, once entered
    pub entered_by: Option<String>,
}

impl From<ValidationView> for ValidatedEntryResponse {
    fn from(view: ValidationView) -> Self {
        let record = view.record;

        Self {
            phone: view.phone,
            entered: record.is_entered(),
            entry_timestamp: record.entered_at().map(|at| at.to_string()),
            entered_by: record.entered_by().map(|by| by.to_string()),
            name: record.name,
            tickets: record.ticket_count,
            validated_at: record.validated_at.to_string(),
            request_origin: record.request_origin,
            token: record.token.into(),
            newsletter: record.newsletter_opt_in,
        }
    }
}

/// Validated Entries Handler
///
/// Lists admissions, newest first.
#[endpoint(
    tags("guests"),
    summary = "List Validated Entries",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<ValidatedEntryResponse>>, StatusError> {
    let state = depot.state_or_500()?;

    let entries = state.app.guests.list_validations().await;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use guestgate_app::guests::MockGuestsService;

    use crate::{guests::handlers::tests::dana_record, test_helpers::guests_service};

    use super::*;

    #[tokio::test]
    async fn test_validated_lists_masked_entries() -> TestResult {
        let mut guests = MockGuestsService::new();

        guests.expect_stats().never();
        guests.expect_list_guests().never();
        guests.expect_add_guest().never();
        guests.expect_list_validations().once().return_once(|| {
            vec![ValidationView {
                phone: "050****567".to_string(),
                record: dana_record(true),
            }]
        });

        let mut res = TestClient::get("http://example.com/validated")
            .send(&guests_service(
                guests,
                Router::with_path("validated").get(handler),
            ))
            .await;

        let body: Vec<ValidatedEntryResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].phone, "050****567");
        assert_eq!(body[0].token, "AB12CD");
        assert!(body[0].entered);
        assert_eq!(body[0].entered_by.as_deref(), Some("DoorCode"));
        assert_eq!(
            body[0].entry_timestamp.as_deref(),
            Some("1970-01-01T00:00:00Z")
        );

        Ok(())
    }
}

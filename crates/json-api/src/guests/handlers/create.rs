//! Create Guest Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use guestgate_app::guests::NewGuest;

use crate::{
    envelope::{reject, respond},
    extensions::*,
    guests::errors::render_add_guest_error,
};

/// Create Guest Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateGuestRequest {
    pub name: Option<String>,

    /// Any formatting; non-digits are stripped
    pub phone: Option<String>,

    pub tickets: Option<u32>,

    pub newsletter: Option<bool>,
}

/// The stored roster entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatedGuest {
    pub name: String,

    /// Normalized phone
    pub phone: String,

    pub tickets: u32,
}

/// Create Guest Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateGuestResponse {
    pub success: bool,

    pub guest: CreatedGuest,
}

/// Create Guest Handler
///
/// Adds a guest to the roster.
#[endpoint(
    tags("guests"),
    summary = "Create Guest",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Guest added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing fields or invalid phone"),
        (status_code = StatusCode::CONFLICT, description = "Phone already on the roster"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateGuestRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;

    let CreateGuestRequest {
        name: Some(name),
        phone: Some(phone),
        tickets: Some(ticket_count),
        newsletter,
    } = json.into_inner()
    else {
        reject(res, StatusCode::BAD_REQUEST, "Missing required fields");

        return Ok(());
    };

    let guest = NewGuest {
        name,
        phone,
        ticket_count,
        newsletter_opt_in: newsletter.unwrap_or_default(),
    };

    match state.app.guests.add_guest(guest).await {
        Ok((phone, record)) => respond(
            res,
            StatusCode::OK,
            CreateGuestResponse {
                success: true,
                guest: CreatedGuest {
                    name: record.name,
                    phone: phone.into(),
                    tickets: record.ticket_count,
                },
            },
        ),
        Err(error) => render_add_guest_error(res, error),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use guestgate::{
        phones::{Phone, PhoneError},
        roster::GuestRecord,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use guestgate_app::guests::{AddGuestError, MockGuestsService};

    use crate::{envelope::Failure, test_helpers::guests_service};

    use super::*;

    fn make_service(guests: MockGuestsService) -> Service {
        guests_service(guests, Router::with_path("guests").post(handler))
    }

    fn quiet(guests: &mut MockGuestsService) {
        guests.expect_stats().never();
        guests.expect_list_validations().never();
        guests.expect_list_guests().never();
    }

    #[tokio::test]
    async fn test_create_guest_returns_normalized_phone() -> TestResult {
        let phone = Phone::parse("0501234567")?;
        let mut guests = MockGuestsService::new();

        quiet(&mut guests);

        guests
            .expect_add_guest()
            .once()
            .withf(|guest| {
                guest.name == "Dana"
                    && guest.phone == "050-123-4567"
                    && guest.ticket_count == 2
                    && guest.newsletter_opt_in
            })
            .return_once(move |_| {
                Ok((
                    phone,
                    GuestRecord {
                        name: "Dana".to_string(),
                        ticket_count: 2,
                        newsletter_opt_in: true,
                    },
                ))
            });

        let mut res = TestClient::post("http://example.com/guests")
            .json(&json!({
                "name": "Dana",
                "phone": "050-123-4567",
                "tickets": 2,
                "newsletter": true,
            }))
            .send(&make_service(guests))
            .await;

        let body: CreateGuestResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.success);
        assert_eq!(body.guest.phone, "0501234567");
        assert_eq!(body.guest.tickets, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_guest_missing_tickets_returns_400() -> TestResult {
        let mut guests = MockGuestsService::new();

        quiet(&mut guests);
        guests.expect_add_guest().never();

        let mut res = TestClient::post("http://example.com/guests")
            .json(&json!({ "name": "Dana", "phone": "0501234567" }))
            .send(&make_service(guests))
            .await;

        let body: Failure = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Missing required fields");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_guest_duplicate_returns_409() -> TestResult {
        let phone = Phone::parse("0501234567")?;
        let mut guests = MockGuestsService::new();

        quiet(&mut guests);

        guests
            .expect_add_guest()
            .once()
            .return_once(move |_| Err(AddGuestError::DuplicatePhone(phone)));

        let res = TestClient::post("http://example.com/guests")
            .json(&json!({ "name": "Dana", "phone": "0501234567", "tickets": 1 }))
            .send(&make_service(guests))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_guest_invalid_phone_returns_400() -> TestResult {
        let mut guests = MockGuestsService::new();

        quiet(&mut guests);

        guests
            .expect_add_guest()
            .once()
            .return_once(|_| Err(AddGuestError::InvalidPhone(PhoneError::InvalidLength(3))));

        let mut res = TestClient::post("http://example.com/guests")
            .json(&json!({ "name": "Dana", "phone": "123", "tickets": 1 }))
            .send(&make_service(guests))
            .await;

        let body: Failure = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Invalid phone number");

        Ok(())
    }
}

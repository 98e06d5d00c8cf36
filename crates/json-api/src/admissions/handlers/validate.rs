//! Validate Phone Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use guestgate_app::admissions::ValidationRequest;

use crate::{
    admissions::errors::render_validation_error,
    envelope::{reject, respond},
    extensions::*,
    observability::record_validation,
};

/// Validate Phone Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidateRequest {
    /// Phone number in any formatting; non-digits are ignored
    pub phone: Option<String>,

    /// Guest asked for newsletter updates
    pub newsletter: Option<bool>,
}

/// Admitted guest
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdmittedGuest {
    pub name: String,

    pub tickets: u32,

    /// Code to show door staff
    pub token: String,
}

/// Validate Phone Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidateResponse {
    pub success: bool,

    pub guest: AdmittedGuest,
}

/// Validate Phone Handler
///
/// Admits a phone on the guest list once and issues its door code.
#[endpoint(
    tags("admissions"),
    summary = "Validate Phone",
    responses(
        (status_code = StatusCode::OK, description = "Phone admitted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid phone"),
        (status_code = StatusCode::FORBIDDEN, description = "Phone already validated"),
        (status_code = StatusCode::NOT_FOUND, description = "Not on the guest list"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ValidateRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;
    let ValidateRequest { phone, newsletter } = json.into_inner();

    let Some(phone) = phone.filter(|phone| !phone.trim().is_empty()) else {
        record_validation("missing_phone");
        reject(res, StatusCode::BAD_REQUEST, "Phone number is missing");

        return Ok(());
    };

    let request = ValidationRequest {
        origin: req.client_origin(),
        newsletter_opt_in: newsletter.unwrap_or(false),
    };

    match state.app.admissions.validate(&phone, request).await {
        Ok(admission) => {
            record_validation("admitted");

            respond(
                res,
                StatusCode::OK,
                ValidateResponse {
                    success: true,
                    guest: AdmittedGuest {
                        name: admission.name,
                        tickets: admission.ticket_count,
                        token: admission.token.into(),
                    },
                },
            );
        }
        Err(error) => render_validation_error(res, error),
    }

    Ok(())
}

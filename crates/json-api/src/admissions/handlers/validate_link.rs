//! Validate Link Handlers
//!
//! Admin-only HTML pages behind the link encoded in a guest's QR code.

use salvo::{http::header::CACHE_CONTROL, oapi::extract::PathParam, prelude::*};

use guestgate_app::admissions::{EntryError, EntryMethod};

use crate::{
    admissions::{
        errors::entry_outcome,
        pages::{entered_page, error_page, lookup_page},
    },
    extensions::*,
    observability::record_entry,
};

/// Validate Link Page
///
/// Shows the admission behind `token` with a confirm button.
#[endpoint(
    tags("admissions"),
    summary = "Validate Link Page",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Admission page"),
        (status_code = StatusCode::NOT_FOUND, description = "Token not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
    ),
)]
pub(crate) async fn get_handler(
    token: PathParam<String>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;

    no_store(res)?;

    match state.app.admissions.lookup_token(&token.into_inner()).await {
        Some(lookup) => {
            res.render(Text::Html(lookup_page(&lookup)));
        }
        None => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Text::Html(error_page(
                "Code not found",
                "No admission carries this code.",
            )));
        }
    }

    Ok(())
}

/// Validate Link Confirmation
///
/// Confirms entry for the admission behind `token`.
#[endpoint(
    tags("admissions"),
    summary = "Validate Link Confirmation",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Entry confirmed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Already entered"),
        (status_code = StatusCode::NOT_FOUND, description = "Token not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
    ),
)]
pub(crate) async fn confirm_handler(
    token: PathParam<String>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;

    no_store(res)?;

    let result = state
        .app
        .admissions
        .confirm_entry(&token.into_inner(), EntryMethod::AdminLink)
        .await;

    match result {
        Ok(confirmation) => {
            record_entry("entered");

            res.render(Text::Html(entered_page(&confirmation)));
        }
        Err(error) => {
            record_entry(entry_outcome(&error));

            let (status, title, message) = match error {
                EntryError::MissingToken | EntryError::TokenNotFound => (
                    StatusCode::NOT_FOUND,
                    "Code not found",
                    "No admission carries this code.".to_string(),
                ),
                EntryError::AlreadyEntered { name, entered_at } => (
                    StatusCode::BAD_REQUEST,
                    "Already entered",
                    format!("{name} entered at {entered_at}."),
                ),
            };

            res.status_code(status);
            res.render(Text::Html(error_page(title, &message)));
        }
    }

    Ok(())
}

fn no_store(res: &mut Response) -> Result<(), StatusError> {
    res.add_header(CACHE_CONTROL, "no-store", true)
        .or_500("failed to set cache-control header")?;

    Ok(())
}

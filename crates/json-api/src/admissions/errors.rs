//! Admission Errors

use salvo::{http::StatusCode, oapi::ToSchema, prelude::Response};
use serde::{Deserialize, Serialize};

use guestgate_app::admissions::{EntryError, ValidationError};

use crate::{
    envelope::{reject, respond},
    observability::{record_entry, record_validation},
};

/// Already validated rejection, with the existing admission for context
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AlreadyValidatedResponse {
    /// Always `false`
    pub success: bool,

    /// Human-readable reason
    pub message: String,

    /// When the phone was first validated, RFC 3339
    pub validated_at: String,

    /// Guest name on the existing admission
    pub validated_by: String,

    /// Token issued with the existing admission
    pub token: String,
}

pub(crate) fn render_validation_error(res: &mut Response, error: ValidationError) {
    record_validation(validation_outcome(&error));

    match error {
        ValidationError::InvalidPhone(_) => {
            reject(res, StatusCode::BAD_REQUEST, "Invalid phone number");
        }
        ValidationError::AlreadyValidated(existing) => respond(
            res,
            StatusCode::FORBIDDEN,
            AlreadyValidatedResponse {
                success: false,
                message: "This phone number was already validated".to_string(),
                validated_at: existing.validated_at.to_string(),
                validated_by: existing.name,
                token: existing.token.into(),
            },
        ),
        ValidationError::NotOnRoster => {
            reject(res, StatusCode::NOT_FOUND, "Not on the guest list");
        }
        ValidationError::TokenUnavailable => reject(
            res,
            StatusCode::SERVICE_UNAVAILABLE,
            "Could not issue an entry code, please try again",
        ),
    }
}

pub(crate) fn render_entry_error(res: &mut Response, error: EntryError) {
    record_entry(entry_outcome(&error));

    match error {
        EntryError::MissingToken => reject(res, StatusCode::BAD_REQUEST, "Code is required"),
        EntryError::TokenNotFound => reject(res, StatusCode::NOT_FOUND, "Code not found"),
        EntryError::AlreadyEntered { name, entered_at } => reject(
            res,
            StatusCode::BAD_REQUEST,
            format!("Code already used. Guest {name} entered at {entered_at}."),
        ),
    }
}

fn validation_outcome(error: &ValidationError) -> &'static str {
    match error {
        ValidationError::InvalidPhone(_) => "invalid_phone",
        ValidationError::AlreadyValidated(_) => "already_validated",
        ValidationError::NotOnRoster => "not_on_roster",
        ValidationError::TokenUnavailable => "token_unavailable",
    }
}

pub(crate) fn entry_outcome(error: &EntryError) -> &'static str {
    match error {
        EntryError::MissingToken => "missing_token",
        EntryError::TokenNotFound => "token_not_found",
        EntryError::AlreadyEntered { .. } => "already_entered",
    }
}

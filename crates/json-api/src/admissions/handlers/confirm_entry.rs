//! Confirm Entry Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Deserializer, Serialize};

use guestgate_app::admissions::{EntryError, EntryMethod};

use crate::{
    admissions::errors::render_entry_error, envelope::respond, extensions::*,
    observability::record_entry,
};

/// Confirm Entry Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ConfirmEntryRequest {
    /// Door code as shown by the guest. A bare JSON number is read as its digits.
    #[serde(alias = "token", default, deserialize_with = "deserialize_code")]
    pub code: Option<String>,
}

fn deserialize_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Code>::deserialize(deserializer)?.map(|code| match code {
        Code::Text(text) => text,
        Code::Number(number) => number.to_string(),
    }))
}

/// Confirm Entry Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConfirmEntryResponse {
    pub success: bool,

    pub guest_name: String,

    pub tickets_validated: u32,

    pub message: String,
}

/// Confirm Entry Handler
///
/// Marks the guest holding `code` as physically entered. Each code works once.
#[endpoint(
    tags("admissions"),
    summary = "Confirm Entry",
    responses(
        (status_code = StatusCode::OK, description = "Entry confirmed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing code or already entered"),
        (status_code = StatusCode::NOT_FOUND, description = "Code not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ConfirmEntryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;

    let Some(code) = json.into_inner().code else {
        render_entry_error(res, EntryError::MissingToken);

        return Ok(());
    };

    match state
        .app
        .admissions
        .confirm_entry(&code, EntryMethod::DoorCode)
        .await
    {
        Ok(confirmation) => {
            record_entry("entered");

            respond(
                res,
                StatusCode::OK,
                ConfirmEntryResponse {
                    success: true,
                    message: format!(
                        "Guest {} successfully validated for entry.",
                        confirmation.name
                    ),
                    guest_name: confirmation.name,
                    tickets_validated: confirmation.ticket_count,
                },
            );
        }
        Err(error) => render_entry_error(res, error),
    }

    Ok(())
}

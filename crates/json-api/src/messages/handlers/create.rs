//! Share Message Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use guestgate_app::messages::MessagesServiceError;

use crate::{
    envelope::{reject, respond},
    extensions::*,
    messages::errors::render_messages_error,
};

/// Share Message Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShareMessageRequest {
    pub message: Option<String>,

    /// The phone the guest validated with
    pub guest_phone: Option<String>,
}

/// Share Message Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShareMessageResponse {
    pub success: bool,

    pub message: String,
}

/// Share Message Handler
///
/// Leaves a message for the hosts. Each validated phone may post once.
#[endpoint(
    tags("messages"),
    summary = "Share Message",
    responses(
        (status_code = StatusCode::OK, description = "Message stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty, too long or invalid phone"),
        (status_code = StatusCode::FORBIDDEN, description = "Phone not validated"),
        (status_code = StatusCode::CONFLICT, description = "Phone already posted"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ShareMessageRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;

    let ShareMessageRequest {
        message,
        guest_phone,
    } = json.into_inner();

    let Some(guest_phone) = guest_phone else {
        reject(res, StatusCode::BAD_REQUEST, "Invalid phone number");

        return Ok(());
    };

    let Some(message) = message else {
        render_messages_error(res, MessagesServiceError::Empty);

        return Ok(());
    };

    match state
        .app
        .messages
        .post_message(&guest_phone, &message)
        .await
    {
        Ok(_) => respond(
            res,
            StatusCode::OK,
            ShareMessageResponse {
                success: true,
                message: "Thank you for your message".to_string(),
            },
        ),
        Err(error) => render_messages_error(res, error),
    }

    Ok(())
}

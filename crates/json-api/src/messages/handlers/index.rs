//! Message Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use guestgate_app::messages::records::MessageView;

use crate::extensions::*;

/// A guest message, with the phone masked
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MessageResponse {
    pub phone: String,

    pub name: String,

    pub message: String,

    /// RFC 3339
    pub posted_at: String,
}

impl From<MessageView> for MessageResponse {
    fn from(view: MessageView) -> Self {
        Self {
            phone: view.phone,
            name: view.name,
            message: view.body,
            posted_at: view.posted_at.to_string(),
        }
    }
}

/// Message Index Handler
///
/// Lists guest messages, newest first.
#[endpoint(
    tags("messages"),
    summary = "List Messages",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<MessageResponse>>, StatusError> {
    let state = depot.state_or_500()?;

    let messages = state.app.messages.list_messages().await;

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

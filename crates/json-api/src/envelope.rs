//! Response envelopes
//!
//! Rejections use `{ "success": false, "message": ... }` so clients can show
//! the message as-is.

use salvo::{
    http::StatusCode,
    oapi::ToSchema,
    prelude::{Json, Response},
};
use serde::{Deserialize, Serialize};

/// Rejected request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct Failure {
    /// Always `false`
    pub success: bool,

    /// Human-readable reason
    pub message: String,
}

impl Failure {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Render a [`Failure`] with `status`.
pub(crate) fn reject(res: &mut Response, status: StatusCode, message: impl Into<String>) {
    respond(res, status, Failure::new(message));
}

/// Render any JSON body with `status`.
pub(crate) fn respond<T>(res: &mut Response, status: StatusCode, body: T)
where
    T: Serialize + Send,
{
    res.status_code(status);
    res.render(Json(body));
}

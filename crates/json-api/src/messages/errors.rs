//! Message Errors

use salvo::{http::StatusCode, prelude::Response};

use guestgate_app::messages::MessagesServiceError;

use crate::envelope::reject;

pub(crate) fn render_messages_error(res: &mut Response, error: MessagesServiceError) {
    match error {
        MessagesServiceError::Empty => {
            reject(res, StatusCode::BAD_REQUEST, "Message is required");
        }
        MessagesServiceError::TooLong { max } => reject(
            res,
            StatusCode::BAD_REQUEST,
            format!("Message must be at most {max} characters"),
        ),
        MessagesServiceError::InvalidPhone(_) => {
            reject(res, StatusCode::BAD_REQUEST, "Invalid phone number");
        }
        MessagesServiceError::NotValidated => reject(
            res,
            StatusCode::FORBIDDEN,
            "Only validated guests can send a message",
        ),
        MessagesServiceError::AlreadyPosted => reject(
            res,
            StatusCode::CONFLICT,
            "A message was already sent from this phone",
        ),
    }
}

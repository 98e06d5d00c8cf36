//! Guest Errors

use salvo::{http::StatusCode, prelude::Response};

use guestgate_app::guests::AddGuestError;

use crate::envelope::reject;

pub(crate) fn render_add_guest_error(res: &mut Response, error: AddGuestError) {
    match error {
        AddGuestError::InvalidPhone(_) => {
            reject(res, StatusCode::BAD_REQUEST, "Invalid phone number");
        }
        AddGuestError::MissingName => {
            reject(res, StatusCode::BAD_REQUEST, "Missing required fields");
        }
        AddGuestError::DuplicatePhone(_) => reject(
            res,
            StatusCode::CONFLICT,
            "Guest with this phone already exists",
        ),
    }
}

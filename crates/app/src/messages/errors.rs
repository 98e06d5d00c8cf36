//! Messages service errors.

use guestgate::phones::PhoneError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagesServiceError {
    #[error("message is empty")]
    Empty,

    #[error("message is longer than {max} characters")]
    TooLong { max: usize },

    #[error("invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),

    #[error("phone has not been validated")]
    NotValidated,

    #[error("a message was already sent from this phone")]
    AlreadyPosted,
}

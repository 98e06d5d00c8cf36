//! Message records.

use guestgate::phones::Phone;
use jiff::Timestamp;
use serde::Serialize;

/// Longest accepted message, in characters after trimming.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// A message left by a validated guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestMessage {
    pub phone: Phone,

    /// Name from the guest's admission
    pub name: String,

    pub body: String,

    pub posted_at: Timestamp,
}

/// Admin view of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    /// Masked phone
    pub phone: String,

    pub name: String,

    pub body: String,

    pub posted_at: Timestamp,
}

impl From<&GuestMessage> for MessageView {
    fn from(message: &GuestMessage) -> Self {
        Self {
            phone: message.phone.masked(),
            name: message.name.clone(),
            body: message.body.clone(),
            posted_at: message.posted_at,
        }
    }
}

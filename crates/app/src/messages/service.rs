//! Messages service.

use std::sync::Arc;

use async_trait::async_trait;
use guestgate::phones::Phone;
use jiff::Timestamp;
use mockall::automock;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    gate::SharedGate,
    messages::{
        errors::MessagesServiceError,
        records::{GuestMessage, MAX_MESSAGE_CHARS, MessageView},
    },
};

/// Messages kept in memory next to the gate.
///
/// Lock order is gate, then messages.
#[derive(Debug, Clone)]
pub struct InMemoryMessagesService {
    gate: SharedGate,
    messages: Arc<RwLock<Vec<GuestMessage>>>,
}

impl InMemoryMessagesService {
    #[must_use]
    pub fn new(gate: SharedGate) -> Self {
        Self {
            gate,
            messages: Arc::default(),
        }
    }
}

#[async_trait]
impl MessagesService for InMemoryMessagesService {
    async fn post_message(
        &self,
        phone: &str,
        body: &str,
    ) -> Result<MessageView, MessagesServiceError> {
        let body = body.trim();

        if body.is_empty() {
            return Err(MessagesServiceError::Empty);
        }

        if body.chars().count() > MAX_MESSAGE_CHARS {
            return Err(MessagesServiceError::TooLong {
                max: MAX_MESSAGE_CHARS,
            });
        }

        let phone = Phone::parse(phone)?;

        let gate = self.gate.read().await;

        let name = gate
            .ledger()
            .get(&phone)
            .map(|record| record.name.clone())
            .ok_or(MessagesServiceError::NotValidated)?;

        let mut messages = self.messages.write().await;

        if messages.iter().any(|message| message.phone == phone) {
            return Err(MessagesServiceError::AlreadyPosted);
        }

        let message = GuestMessage {
            phone,
            name,
            body: body.to_string(),
            posted_at: Timestamp::now(),
        };

        info!(
            phone = %message.phone.masked(),
            chars = message.body.chars().count(),
            "guest message received"
        );

        let view = MessageView::from(&message);

        messages.push(message);

        Ok(view)
    }

    async fn list_messages(&self) -> Vec<MessageView> {
        self.messages
            .read()
            .await
            .iter()
            .rev()
            .map(MessageView::from)
            .collect()
    }
}

#[automock]
#[async_trait]
/// Messages guests leave for the hosts.
pub trait MessagesService: Send + Sync {
    /// Store a message from a validated guest.
    async fn post_message(
        &self,
        phone: &str,
        body: &str,
    ) -> Result<MessageView, MessagesServiceError>;

    /// Every message, newest first.
    async fn list_messages(&self) -> Vec<MessageView>;
}

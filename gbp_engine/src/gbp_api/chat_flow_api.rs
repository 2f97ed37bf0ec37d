use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{ChatMessage, MessageSender, NewChatMessage},
    events::{EventProducers, MessageReceivedEvent},
    gbp_api::errors::ChatError,
    traits::ChatManagement,
};

pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// `ChatFlowApi` stores support chat conversations and notifies the reply hook when a visitor writes in.
#[derive(Clone)]
pub struct ChatFlowApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for ChatFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChatFlowApi")
    }
}

impl<B> ChatFlowApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

fn validate(browser_id: &str, content: &str) -> Result<(), ChatError> {
    if browser_id.trim().is_empty() {
        return Err(ChatError::ValidationError("A browser id is required".into()));
    }
    if content.is_empty() {
        return Err(ChatError::ValidationError("The message cannot be empty".into()));
    }
    if content.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(ChatError::ValidationError(format!("Messages are limited to {MAX_MESSAGE_LENGTH} characters")));
    }
    Ok(())
}

impl<B> ChatFlowApi<B>
where B: ChatManagement
{
    /// Stores a visitor's message and publishes a [`MessageReceivedEvent`] for it.
    pub async fn post_message(&self, browser_id: &str, content: &str) -> Result<ChatMessage, ChatError> {
        let content = content.trim();
        validate(browser_id, content)?;
        let message = NewChatMessage::new(browser_id.trim(), content, MessageSender::User);
        let message = self.db.insert_message(message).await?;
        debug!("💬️ Message #{} received from {}", message.id, message.browser_id);
        for emitter in &self.producers.message_received_producer {
            emitter.publish_event(MessageReceivedEvent::new(message.clone())).await;
        }
        Ok(message)
    }

    /// Stores a reply from the support responder or an admin.
    pub async fn post_reply(
        &self,
        browser_id: &str,
        content: &str,
        sender: MessageSender,
    ) -> Result<ChatMessage, ChatError> {
        if sender == MessageSender::User {
            return Err(ChatError::ValidationError("Replies must come from support or an admin".into()));
        }
        let content = content.trim();
        validate(browser_id, content)?;
        let message = NewChatMessage::new(browser_id.trim(), content, sender);
        let message = self.db.insert_message(message).await?;
        trace!("💬️ {} reply #{} stored for {}", message.sender, message.id, message.browser_id);
        Ok(message)
    }

    pub async fn messages_for(&self, browser_id: &str) -> Result<Vec<ChatMessage>, ChatError> {
        if browser_id.trim().is_empty() {
            return Err(ChatError::ValidationError("A browser id is required".into()));
        }
        let messages = self.db.fetch_messages(browser_id.trim()).await?;
        Ok(messages)
    }
}

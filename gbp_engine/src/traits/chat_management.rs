use crate::{
    db_types::{ChatMessage, NewChatMessage},
    traits::StoreError,
};

/// Storage for support chat messages.
#[allow(async_fn_in_trait)]
pub trait ChatManagement {
    async fn insert_message(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError>;

    /// The chat history for a visitor, oldest first.
    async fn fetch_messages(&self, browser_id: &str) -> Result<Vec<ChatMessage>, StoreError>;
}

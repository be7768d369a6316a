use async_trait::async_trait;

use crate::application::errors::FetchError;
use crate::domain::entities::{Chat, Message, Session};

/// ChatService trait - abstraction over the remote chat history service
///
/// Each method is exactly one network call. Retrying is the caller's
/// business (see `FetchPolicy`).
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Every chat the session's user takes part in, in display order
    async fn fetch_chat_list(&self, session: &Session) -> Result<Vec<Chat>, FetchError>;

    /// Full message history of one chat, oldest first
    async fn fetch_chat_messages(&self, session: &Session, chat_id: &str) -> Result<Vec<Message>, FetchError>;

    /// Hand a new message to the server for delivery
    async fn send_message(&self, session: &Session, chat_id: &str, message: &Message) -> Result<(), FetchError>;
}

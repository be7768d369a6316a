//! Domain entities - Chats, messages and the status vocabulary

pub mod chat;
pub mod message;
pub mod session;
pub mod status;

pub use chat::{direct_chat_id, Chat, ChatId};
pub use message::{Message, UserId};
pub use session::Session;
pub use status::{OperationKind, OperationStatus};

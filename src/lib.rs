//! Chat synchronization client for the WUPHF messaging service.
//!
//! [`ChatSync`] owns a [`ChatStore`] and keeps it in step with the remote
//! service; a UI renders from [`ChatSync::snapshot`].

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::errors::{ConfigError, FetchError, StoreError};
pub use application::services::{ChatSync, FetchPolicy};
pub use application::store::{ChatStore, RequestTicket, Snapshot};
pub use domain::entities::{direct_chat_id, Chat, ChatId, Message, OperationKind, OperationStatus, Session, UserId};
pub use domain::traits::ChatService;
pub use infrastructure::config::Config;
pub use infrastructure::remote::HttpChatService;

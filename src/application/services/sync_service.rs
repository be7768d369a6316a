use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::application::errors::FetchError;
use crate::application::services::FetchPolicy;
use crate::application::store::{ChatStore, Snapshot};
use crate::domain::entities::{Message, OperationKind, Session};
use crate::domain::traits::ChatService;

/// Keeps a [`ChatStore`] in step with the remote chat service.
///
/// Operations report progress through the store's status instead of
/// returning errors. The store lock is never held across an await, so
/// concurrent operations only interleave at network boundaries.
pub struct ChatSync<S: ChatService> {
    remote: S,
    store: Arc<RwLock<ChatStore>>,
    policy: FetchPolicy,
}

impl<S: ChatService> ChatSync<S> {
    pub fn new(remote: S) -> Self {
        Self {
            remote,
            store: Arc::new(RwLock::new(ChatStore::new())),
            policy: FetchPolicy::default(),
        }
    }

    /// Retry policy for chat list loads
    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Share an existing store, e.g. one the UI already renders from
    pub fn with_store(mut self, store: Arc<RwLock<ChatStore>>) -> Self {
        self.store = store;
        self
    }

    pub fn remote(&self) -> &S {
        &self.remote
    }

    pub fn store(&self) -> Arc<RwLock<ChatStore>> {
        Arc::clone(&self.store)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.read().snapshot()
    }

    /// Fetch every chat of the session's user and replace the local list.
    ///
    /// Goes through the fetch policy, so "not found" is retried.
    pub async fn load_chat_list(&self, session: &Session) {
        let ticket = self.write().begin(OperationKind::ChatList);
        tracing::info!("Loading chat list for {}", session.user_id);

        let remote = &self.remote;
        let result = self.policy.run(move || remote.fetch_chat_list(session)).await;

        let mut store = self.write();
        match result {
            Ok(chats) => {
                let count = chats.len();
                if store.complete_chat_list(&ticket, chats) {
                    tracing::info!("Loaded {} chats", count);
                } else {
                    tracing::debug!("Discarded stale chat list response");
                }
            }
            Err(e) => {
                tracing::warn!("Failed to load chat list: {}", e);
                store.fail(&ticket, e.to_string());
            }
        }
    }

    /// Fetch one chat's history and upsert it. Single attempt.
    pub async fn load_chat_messages(&self, session: &Session, chat_id: &str) {
        let ticket = self.write().begin(OperationKind::ChatMessages(chat_id.to_string()));
        tracing::info!("Loading messages of {}", chat_id);

        let result = self.remote.fetch_chat_messages(session, chat_id).await;

        let mut store = self.write();
        match result {
            Ok(messages) => {
                let count = messages.len();
                if store.complete_chat_messages(&ticket, messages) {
                    tracing::info!("Loaded {} messages of {}", count, chat_id);
                } else {
                    tracing::debug!("Discarded stale messages response for {}", chat_id);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to load messages of {}: {}", chat_id, e);
                store.fail(&ticket, e.to_string());
            }
        }
    }

    /// Optimistically echo a message the caller already sent.
    ///
    /// Unknown chats drop the message silently.
    pub fn append_local_message(&self, chat_id: &str, message: Message) {
        if let Err(e) = self.write().append_message(chat_id, message) {
            tracing::debug!("Dropped local echo: {}", e);
        }
    }

    /// Send through the remote service, then echo locally on success
    pub async fn send_and_echo(
        &self,
        session: &Session,
        chat_id: &str,
        text: impl Into<String>,
    ) -> Result<Message, FetchError> {
        let message = Message::new(session.user_id.clone(), text);
        self.remote.send_message(session, chat_id, &message).await?;
        self.append_local_message(chat_id, message.clone());
        Ok(message)
    }

    fn read(&self) -> RwLockReadGuard<'_, ChatStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ChatStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

//! Chat store - the authoritative in-memory model of chats and their messages

use std::collections::HashMap;

use crate::application::errors::StoreError;
use crate::domain::entities::{Chat, ChatId, Message, OperationKind, OperationStatus};


static IDLE: OperationStatus = OperationStatus::Idle;
static LOADING: OperationStatus = OperationStatus::Loading;

/// Handle for one in-flight synchronization, issued by [`ChatStore::begin`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    kind: OperationKind,
    seq: u64,
}

impl RequestTicket {
    pub fn kind(&self) -> &OperationKind {
        &self.kind
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Bookkeeping for one operation kind
#[derive(Debug, Clone, Default)]
struct KindState {
    status: OperationStatus,
    /// Newest ticket handed out
    issued: u64,
    /// Newest ticket whose payload reached the chats
    applied: u64,
    /// Store clock at the last status write
    updated: u64,
}

/// Point-in-time copy of the store for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub chats: Vec<Chat>,
    pub status: OperationStatus,
    pub list_status: OperationStatus,
    pub message_status: HashMap<ChatId, OperationStatus>,
}

impl Snapshot {
    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }

    pub fn chat(&self, chat_id: &str) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == chat_id)
    }
}

/// Owns every chat and its messages, plus per-operation status.
///
/// Chats keep the order in which they were first inserted. A chat id
/// appears at most once.
#[derive(Debug, Default)]
pub struct ChatStore {
    chats: Vec<Chat>,
    kinds: HashMap<OperationKind, KindState>,
    clock: u64,
    /// Store clock at the last successful completion of any kind
    last_success: u64,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn chat(&self, chat_id: &str) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == chat_id)
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    pub fn status_of(&self, kind: &OperationKind) -> &OperationStatus {
        self.kinds.get(kind).map(|s| &s.status).unwrap_or(&IDLE)
    }

    pub fn list_status(&self) -> &OperationStatus {
        self.status_of(&OperationKind::ChatList)
    }

    pub fn messages_status(&self, chat_id: &str) -> &OperationStatus {
        self.status_of(&OperationKind::ChatMessages(chat_id.to_string()))
    }

    /// Combined view over every operation kind.
    ///
    /// Loading while anything is loading, otherwise the most recent failure
    /// newer than the last success, otherwise idle.
    pub fn status(&self) -> &OperationStatus {
        if self.kinds.values().any(|s| s.status.is_loading()) {
            return &LOADING;
        }
        self.kinds
            .values()
            .filter(|s| s.status.is_failed() && s.updated > self.last_success)
            .max_by_key(|s| s.updated)
            .map(|s| &s.status)
            .unwrap_or(&IDLE)
    }

    pub fn error(&self) -> Option<&str> {
        self.status().error()
    }

    /// Mark `kind` as loading and hand out a ticket for its response
    pub fn begin(&mut self, kind: OperationKind) -> RequestTicket {
        let seq = self.tick();
        let state = self.kinds.entry(kind.clone()).or_default();
        state.issued = seq;
        state.status = OperationStatus::Loading;
        state.updated = seq;
        RequestTicket { kind, seq }
    }

    /// Replace every chat with a freshly fetched list.
    ///
    /// Returns false when the response was stale and nothing changed.
    pub fn complete_chat_list(&mut self, ticket: &RequestTicket, chats: Vec<Chat>) -> bool {
        if ticket.kind != OperationKind::ChatList {
            return false;
        }
        let Some(latest) = self.settle(ticket) else {
            return false;
        };

        let mut merged: Vec<Chat> = Vec::with_capacity(chats.len());
        for chat in chats {
            match merged.iter_mut().find(|c| c.id == chat.id) {
                Some(existing) => *existing = chat,
                None => merged.push(chat),
            }
        }
        self.chats = merged;

        let chats = &self.chats;
        self.kinds.retain(|kind, state| match kind {
            OperationKind::ChatMessages(id) => state.status.is_loading() || chats.iter().any(|c| &c.id == id),
            OperationKind::ChatList => true,
        });

        if latest {
            self.set_status(&ticket.kind, OperationStatus::Idle);
        }
        true
    }

    /// Upsert one chat's history. Other chats are left untouched.
    ///
    /// Returns false when the response was stale and nothing changed.
    pub fn complete_chat_messages(&mut self, ticket: &RequestTicket, messages: Vec<Message>) -> bool {
        let OperationKind::ChatMessages(chat_id) = &ticket.kind else {
            return false;
        };
        let chat_id = chat_id.clone();
        let Some(latest) = self.settle(ticket) else {
            return false;
        };

        self.upsert(Chat::new(chat_id).with_messages(messages));

        if latest {
            self.set_status(&ticket.kind, OperationStatus::Idle);
        }
        true
    }

    /// Record a failed fetch. Chats are never touched.
    ///
    /// Only the newest request of a kind may set its status; returns false
    /// when a newer request has been issued since.
    pub fn fail(&mut self, ticket: &RequestTicket, error: impl Into<String>) -> bool {
        let issued = self.kinds.get(&ticket.kind).map(|s| s.issued).unwrap_or(0);
        if ticket.seq != issued {
            return false;
        }
        self.set_status(&ticket.kind, OperationStatus::failed(error));
        true
    }

    /// Insert the chat at the end, or replace the messages of the existing
    /// entry in place.
    pub fn upsert(&mut self, chat: Chat) {
        match self.chats.iter_mut().find(|c| c.id == chat.id) {
            Some(existing) => existing.messages = chat.messages,
            None => self.chats.push(chat),
        }
    }

    /// Append to a chat's timeline without asking the server
    pub fn append_message(&mut self, chat_id: &str, message: Message) -> Result<(), StoreError> {
        let chat = self
            .chats
            .iter_mut()
            .find(|c| c.id == chat_id)
            .ok_or_else(|| StoreError::ChatNotFound(chat_id.to_string()))?;
        chat.messages.push(message);
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        let message_status = self
            .kinds
            .iter()
            .filter_map(|(kind, state)| match kind {
                OperationKind::ChatMessages(id) => Some((id.clone(), state.status.clone())),
                OperationKind::ChatList => None,
            })
            .collect();

        Snapshot {
            chats: self.chats.clone(),
            status: self.status().clone(),
            list_status: self.list_status().clone(),
            message_status,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Decide whether a response may be applied. `None` means a newer
    /// response of the same kind already landed; `Some(latest)` tells
    /// whether this is the newest request issued.
    fn settle(&mut self, ticket: &RequestTicket) -> Option<bool> {
        let state = self.kinds.entry(ticket.kind.clone()).or_default();
        if ticket.seq <= state.applied {
            return None;
        }
        state.applied = ticket.seq;
        Some(ticket.seq == state.issued)
    }

    fn set_status(&mut self, kind: &OperationKind, status: OperationStatus) {
        let now = self.tick();
        if status == OperationStatus::Idle {
            self.last_success = now;
        }
        let state = self.kinds.entry(kind.clone()).or_default();
        state.status = status;
        state.updated = now;
    }
}

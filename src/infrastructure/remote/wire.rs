//! JSON shapes exchanged with the history and notification endpoints

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Chat, Message};

/// Message record as stored by the notification service.
/// Extra fields (`receiver`, `reference`) are ignored.
#[derive(Deserialize, Debug)]
pub(super) struct MessageRecord {
    sender: String,
    msg: String,
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        Message::new(record.sender, record.msg)
    }
}

/// `chatId` is a single id, or a list of ids when the server folds every
/// chat of a user into one record. A folded record carries no usable
/// history; its messages are discarded.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub(super) enum ChatIdField {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize, Debug)]
pub(super) struct ChatRecord {
    #[serde(rename = "chatId")]
    chat_id: ChatIdField,
    #[serde(default)]
    messages: Option<Vec<MessageRecord>>,
}

impl ChatRecord {
    pub(super) fn into_chats(self) -> Vec<Chat> {
        let messages: Vec<Message> = self
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(Message::from)
            .collect();

        match self.chat_id {
            ChatIdField::One(id) => vec![Chat::new(id).with_messages(messages)],
            ChatIdField::Many(ids) => {
                if !messages.is_empty() {
                    tracing::debug!(
                        "Dropping {} messages of a record folding {} chat ids",
                        messages.len(),
                        ids.len()
                    );
                }
                ids.into_iter().map(Chat::new).collect()
            }
        }
    }
}

/// Body of `GET /history?chatId=`: either a chat record or the bare
/// message array
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub(super) enum HistoryPayload {
    Chat(ChatRecord),
    Messages(Vec<MessageRecord>),
}

impl HistoryPayload {
    pub(super) fn into_messages(self) -> Vec<Message> {
        match self {
            HistoryPayload::Chat(record) => record
                .messages
                .unwrap_or_default()
                .into_iter()
                .map(Message::from)
                .collect(),
            HistoryPayload::Messages(records) => records.into_iter().map(Message::from).collect(),
        }
    }
}

/// Body of `POST /notification`
#[derive(Serialize, Debug)]
pub(super) struct NotificationRequest<'a> {
    pub sender: &'a str,
    pub chat_id: &'a str,
    pub msg: &'a str,
}

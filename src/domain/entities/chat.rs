use sha2::{Digest, Sha256};

use super::Message;

/// Stable conversation identifier
pub type ChatId = String;

/// A conversation and its timeline, oldest message first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: ChatId,
    pub messages: Vec<Message>,
}

impl Chat {
    pub fn new(id: impl Into<ChatId>) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
        }
    }

    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Chat id the server assigns to a conversation between `participants`.
///
/// Participants are sorted before hashing, so argument order does not matter.
pub fn direct_chat_id<S: AsRef<str>>(participants: &[S]) -> ChatId {
    let mut ids: Vec<&str> = participants.iter().map(|p| p.as_ref()).collect();
    ids.sort_unstable();

    let mut hasher = Sha256::new();
    hasher.update(ids.join("_").as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_chat_id_is_order_independent() {
        assert_eq!(direct_chat_id(&["alice", "bob"]), direct_chat_id(&["bob", "alice"]));
    }

    #[test]
    fn test_direct_chat_id_known_value() {
        // sha256("alice_bob")
        assert_eq!(
            direct_chat_id(&["bob", "alice"]),
            "611b6e0ab188c1b2b6ed16d9da695f5729488576753492d068ecbdfe282db569"
        );
    }

    #[test]
    fn test_chat_builder() {
        let chat = Chat::new("c1").with_messages(vec![Message::new("u1", "hi")]);
        assert_eq!(chat.id, "c1");
        assert_eq!(chat.last_message(), Some(&Message::new("u1", "hi")));
        assert!(!chat.is_empty());
    }
}

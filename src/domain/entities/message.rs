use std::fmt;

/// Identity of a user as issued by the user service
pub type UserId = String;

/// A single chat message. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message {
    pub sender: UserId,
    pub text: String,
}

impl Message {
    pub fn new(sender: impl Into<UserId>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sender, self.text)
    }
}

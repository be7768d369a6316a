use std::fmt;

use super::ChatId;

/// Which synchronization an [`OperationStatus`] belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperationKind {
    ChatList,
    ChatMessages(ChatId),
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::ChatList => write!(f, "chat list"),
            OperationKind::ChatMessages(id) => write!(f, "messages of {}", id),
        }
    }
}

/// Progress of a synchronization.
///
/// An error message exists exactly when the status is `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationStatus {
    #[default]
    Idle,
    Loading,
    Failed { error: String },
}

impl OperationStatus {
    pub fn failed(error: impl Into<String>) -> Self {
        OperationStatus::Failed { error: error.into() }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, OperationStatus::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, OperationStatus::Failed { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            OperationStatus::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OperationStatus::Idle => "idle",
            OperationStatus::Loading => "loading",
            OperationStatus::Failed { .. } => "failed",
        }
    }
}

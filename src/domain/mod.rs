//! Domain layer - Chat model with no I/O of its own
//! 
//! This layer contains:
//! - Entities: Core objects (Chat, Message, Session, OperationStatus)
//! - Traits: Abstractions for infrastructure (ChatService)

pub mod entities;
pub mod traits;

//! Application layer - Chat synchronization
//! 
//! This layer contains:
//! - Store: The authoritative in-memory chat model
//! - Services: Fetch policy and the synchronization operations
//! - Errors: Fetch, store and config errors

pub mod errors;
pub mod services;
pub mod store;

//! Domain traits - Abstractions for infrastructure implementations

pub mod remote;

pub use remote::ChatService;

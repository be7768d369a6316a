//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Remote: HTTP client for the chat service

pub mod config;
pub mod remote;

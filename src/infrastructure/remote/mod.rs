//! Remote chat service clients

pub mod http;
mod wire;

pub use http::HttpChatService;

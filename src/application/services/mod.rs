//! Application services - Fetch policy and chat synchronization

pub mod fetch_policy;
pub mod sync_service;


pub use fetch_policy::FetchPolicy;
pub use sync_service::ChatSync;

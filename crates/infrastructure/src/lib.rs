//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod file_session_storage;
mod http_api_client;
mod in_memory_session_storage;

pub use file_session_storage::FileSessionStorage;
pub use http_api_client::HttpApiClient;
pub use in_memory_session_storage::InMemorySessionStorage;

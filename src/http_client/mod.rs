//! Construction of the HTTP client used for all backend requests.

mod client;

pub use client::{create_base_client, create_http_client};

use std::sync::Arc;

use reqwest::Client;
use reqwest_middleware::ClientWithMiddleware;

use crate::{config::HttpRetryConfig, http_client::create_http_client};

/// Creates a default HTTP client for testing purposes.
pub fn create_test_http_client() -> Arc<ClientWithMiddleware> {
    Arc::new(create_http_client(&HttpRetryConfig::default(), Client::new()))
}

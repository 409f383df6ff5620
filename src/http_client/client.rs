//! Builds the shared HTTP client, optionally wrapped in retry middleware.

use std::time::Duration;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{Jitter, RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{HttpRetryConfig, JitterSetting};

/// Creates the HTTP client used for backend API requests.
///
/// With `max_retries == 0` (the default) no retry middleware is attached:
/// a failed location push is simply retried by the next fix or timer tick.
/// Operators can opt into transient-error retries through the config.
pub fn create_http_client(config: &HttpRetryConfig, base_client: reqwest::Client) -> ClientWithMiddleware {
    if config.max_retries == 0 {
        return ClientBuilder::new(base_client).build();
    }

    let policy_builder = match config.jitter {
        JitterSetting::None => ExponentialBackoff::builder().jitter(Jitter::None),
        JitterSetting::Full => ExponentialBackoff::builder().jitter(Jitter::Full),
    };

    let retry_policy = policy_builder
        .retry_bounds(config.initial_backoff_ms, config.max_backoff_secs)
        .build_with_max_retries(config.max_retries);

    ClientBuilder::new(base_client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build()
}

/// Builds the base `reqwest` client with connection timeouts suited to a
/// single-origin API.
pub fn create_base_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .connect_timeout(Duration::from_secs(10))
        .build()
}

//! Configuration module for Atalaya.

mod app_config;
mod helpers;
mod http_retry;
mod location;

pub use app_config::AppConfig;
pub use helpers::{
    deserialize_duration_from_seconds, serialize_duration_to_seconds,
    serialize_opt_duration_to_seconds,
};
pub use http_retry::{HttpRetryConfig, JitterSetting};
pub use location::LocationConfig;

//! Application configuration.

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

use super::{
    helpers::deserialize_duration_from_seconds, http_retry::HttpRetryConfig,
    location::LocationConfig,
};

fn default_csrf_cookie_name() -> String {
    "csrftoken".to_string()
}

fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Application configuration for Atalaya.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Base URL of the traffic backend (the origin all API paths are joined
    /// against).
    pub base_url: Url,

    /// The session cookie string sent with every request, e.g.
    /// `"sessionid=...; csrftoken=..."`. The CSRF token is extracted from it.
    pub session_cookie: String,

    /// Name of the cookie carrying the CSRF token.
    #[serde(default = "default_csrf_cookie_name")]
    pub csrf_cookie_name: String,

    /// Retry policy for backend API requests. Defaults to no retries.
    #[serde(default)]
    pub http_retry: HttpRetryConfig,

    /// Position backend settings.
    #[serde(default)]
    pub location: LocationConfig,

    /// The maximum time to wait for the tracker to wind down on shutdown.
    #[serde(
        rename = "shutdown_timeout_secs",
        default = "default_shutdown_timeout",
        deserialize_with = "deserialize_duration_from_seconds"
    )]
    pub shutdown_timeout: Duration,
}

impl AppConfig {
    /// Creates a new `AppConfig` by reading from the configuration directory.
    ///
    /// Reads `<dir>/app.yaml` and applies `ATALAYA__`-prefixed environment
    /// overrides on top.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/app.yaml", config_dir_str)))
            .add_source(Environment::with_prefix("ATALAYA").separator("__"))
            .build()?;
        s.try_deserialize()
    }

    /// Creates a new `AppConfigBuilder` for testing purposes.
    #[cfg(test)]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:8000/").expect("static URL is valid"),
            session_cookie: String::new(),
            csrf_cookie_name: default_csrf_cookie_name(),
            http_retry: HttpRetryConfig::default(),
            location: LocationConfig::default(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

/// A builder for creating `AppConfig` instances for testing.
#[cfg(test)]
#[derive(Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.config.base_url = Url::parse(url).unwrap();
        self
    }

    pub fn session_cookie(mut self, cookie: &str) -> Self {
        self.config.session_cookie = cookie.to_string();
        self
    }

    pub fn http_retry(mut self, retry: HttpRetryConfig) -> Self {
        self.config.http_retry = retry;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

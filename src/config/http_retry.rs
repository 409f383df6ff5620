//! HTTP retry policy configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::helpers::{deserialize_duration_from_ms, deserialize_duration_from_seconds};

/// Location pushes are not retried by default; the next fix or timer tick is
/// the implicit retry.
fn default_max_retries() -> u32 {
    0
}

fn default_initial_backoff_ms() -> Duration {
    Duration::from_millis(250)
}

fn default_max_backoff_secs() -> Duration {
    Duration::from_secs(10)
}

/// Serializable setting for jitter in retry policies.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JitterSetting {
    /// No jitter applied to the backoff duration.
    None,
    /// Full jitter applied, randomizing the backoff duration.
    #[default]
    Full,
}

/// Retry policy applied to backend API requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpRetryConfig {
    /// Maximum number of retries for transient errors. Zero disables the
    /// retry middleware entirely.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff duration before the first retry.
    #[serde(
        default = "default_initial_backoff_ms",
        deserialize_with = "deserialize_duration_from_ms"
    )]
    pub initial_backoff_ms: Duration,

    /// Maximum backoff duration for retries.
    #[serde(
        default = "default_max_backoff_secs",
        deserialize_with = "deserialize_duration_from_seconds"
    )]
    pub max_backoff_secs: Duration,

    /// Jitter to apply to the backoff duration.
    #[serde(default)]
    pub jitter: JitterSetting,
}

impl Default for HttpRetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_secs: default_max_backoff_secs(),
            jitter: JitterSetting::default(),
        }
    }
}

//! Location backend configuration.

use std::time::Duration;

use serde::Deserialize;

use super::helpers::deserialize_duration_from_seconds;

fn default_accuracy_meters() -> f64 {
    25.0
}

/// How often the standing watch polls the backend for a fresh fix.
fn default_watch_poll() -> Duration {
    Duration::from_secs(5)
}

/// Settings for the position backend used by the binary.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationConfig {
    /// Latitude reported by the fixed backend, in decimal degrees.
    pub latitude: f64,

    /// Longitude reported by the fixed backend, in decimal degrees.
    pub longitude: f64,

    /// Accuracy radius attached to produced fixes, in meters.
    #[serde(default = "default_accuracy_meters")]
    pub accuracy_meters: f64,

    /// Poll cadence of the standing watch.
    #[serde(
        rename = "watch_poll_secs",
        default = "default_watch_poll",
        deserialize_with = "deserialize_duration_from_seconds"
    )]
    pub watch_poll: Duration,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            accuracy_meters: default_accuracy_meters(),
            watch_poll: default_watch_poll(),
        }
    }
}

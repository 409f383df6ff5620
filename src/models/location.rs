//! Position fix model.

use chrono::{DateTime, Duration, Utc};

/// One position fix produced by a [`crate::providers::PositionBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSample {
    /// Latitude in decimal degrees.
    pub latitude: f64,

    /// Longitude in decimal degrees.
    pub longitude: f64,

    /// Accuracy radius of the fix, in meters.
    pub accuracy_meters: f64,

    /// When the fix was observed.
    pub observed_at: DateTime<Utc>,
}

impl LocationSample {
    /// Age of this fix relative to `now`. Negative when the fix timestamp
    /// lies in the future.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.observed_at
    }
}

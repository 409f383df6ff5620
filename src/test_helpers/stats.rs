use chrono::{DateTime, Utc};

use crate::models::TrafficStats;

/// A builder for creating `TrafficStats` instances for testing.
pub struct StatsBuilder {
    stats: TrafficStats,
}

impl StatsBuilder {
    /// Creates a builder with no nearby reports and a 5 km radius.
    pub fn new() -> Self {
        Self {
            stats: TrafficStats {
                nearby_reports: 0,
                configured_radius_km: 5.0,
                last_updated_at: None,
            },
        }
    }

    /// Sets the nearby-report count.
    pub fn nearby_reports(mut self, count: u32) -> Self {
        self.stats.nearby_reports = count;
        self
    }

    /// Sets the configured radius.
    pub fn radius_km(mut self, radius: f64) -> Self {
        self.stats.configured_radius_km = radius;
        self
    }

    /// Sets the last-update timestamp.
    pub fn last_updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.stats.last_updated_at = Some(at);
        self
    }

    /// Builds the statistics snapshot.
    pub fn build(self) -> TrafficStats {
        self.stats
    }
}

impl Default for StatsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

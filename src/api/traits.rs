//! The interface the tracking loop uses to talk to the traffic backend.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::error::ApiError;
use crate::models::{ConfigPatch, LocationSample, NotificationConfig, TrafficNotification, TrafficStats};

/// Operations exposed by the traffic backend.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TrafficApi: Send + Sync {
    /// Fetches the user's notification settings.
    async fn fetch_config(&self) -> Result<NotificationConfig, ApiError>;

    /// Reports the user's current position; the response carries any
    /// proximity alerts triggered by it.
    async fn push_location(
        &self,
        sample: &LocationSample,
    ) -> Result<Vec<TrafficNotification>, ApiError>;

    /// Fetches the traffic statistics snapshot for the user's area.
    async fn fetch_stats(&self) -> Result<TrafficStats, ApiError>;

    /// Applies a partial settings update on the backend.
    async fn update_config(&self, patch: &ConfigPatch) -> Result<(), ApiError>;
}

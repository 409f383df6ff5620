//! A position backend that reports a configured, stationary coordinate.
//!
//! Useful for headless deployments (a parked roadside unit, a kiosk) and for
//! demos; real GPS hardware would implement [`PositionBackend`] instead.

use async_trait::async_trait;
use chrono::Utc;

use super::traits::{PositionBackend, PositionError};
use crate::{config::LocationConfig, models::LocationSample};

/// Backend that always produces the same coordinate with a fresh timestamp.
#[derive(Debug, Clone)]
pub struct FixedPositionBackend {
    latitude: f64,
    longitude: f64,
    accuracy_meters: f64,
}

impl FixedPositionBackend {
    /// Creates a backend reporting the given coordinate.
    pub fn new(latitude: f64, longitude: f64, accuracy_meters: f64) -> Self {
        Self { latitude, longitude, accuracy_meters }
    }

    /// Builds the backend from the application's location settings.
    pub fn from_config(config: &LocationConfig) -> Self {
        Self::new(config.latitude, config.longitude, config.accuracy_meters)
    }
}

#[async_trait]
impl PositionBackend for FixedPositionBackend {
    async fn fix(&self) -> Result<LocationSample, PositionError> {
        Ok(LocationSample {
            latitude: self.latitude,
            longitude: self.longitude,
            accuracy_meters: self.accuracy_meters,
            observed_at: Utc::now(),
        })
    }

    async fn probe(&self) -> Result<(), PositionError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(PositionError::Unsupported(
                "fixed backend configured with non-finite coordinates".to_string(),
            ));
        }
        Ok(())
    }
}

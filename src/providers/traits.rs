//! The interface to the platform's positioning capability.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::models::LocationSample;

/// Errors produced while obtaining a position fix.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PositionError {
    /// The user or platform denied access to location data. Transient: the
    /// loop keeps running and retries on the next attempt.
    #[error("Location permission denied")]
    PermissionDenied,

    /// The platform could not determine a position.
    #[error("Position unavailable: {0}")]
    Unavailable(String),

    /// No fix was obtained within the allotted time.
    #[error("Timed out waiting for a position fix")]
    Timeout,

    /// This device has no positioning capability at all. Fatal: the tracker
    /// does not start.
    #[error("Positioning not supported: {0}")]
    Unsupported(String),
}

impl PositionError {
    /// The status-bar message shown to the user for this error.
    pub fn status_message(&self) -> &'static str {
        match self {
            PositionError::PermissionDenied => "Location permission denied",
            PositionError::Unavailable(_) => "Location unavailable",
            PositionError::Timeout => "Timed out obtaining location",
            PositionError::Unsupported(_) => "Geolocation not supported on this device",
        }
    }
}

/// A platform positioning capability: something that can attempt to produce
/// one fresh fix at a time.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PositionBackend: Send + Sync {
    /// Attempts to obtain one fresh fix. Timeouts are enforced by the
    /// caller, not the backend.
    async fn fix(&self) -> Result<LocationSample, PositionError>;

    /// Verifies the capability exists on this device. An `Unsupported` error
    /// here aborts startup.
    async fn probe(&self) -> Result<(), PositionError> {
        Ok(())
    }
}

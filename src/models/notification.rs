//! Traffic notification model and severity tiers.

use serde::{Deserialize, Serialize};

/// A proximity-based traffic alert received from the backend.
///
/// Ephemeral: consumed by the dedup gate as soon as it arrives and never
/// persisted. Field names on the wire follow the backend's Spanish API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficNotification {
    /// Backend identifier of the underlying incident report.
    pub id: i64,

    /// Incident kind (e.g. "accidente", "obra"). Part of the dedup key:
    /// the same report id can surface under distinct kinds.
    #[serde(rename = "tipo")]
    pub kind: String,

    /// Danger level, 1 (low) through 4 (critical).
    #[serde(rename = "nivel_peligro")]
    pub danger_level: u8,

    /// Distance from the reported location, in kilometers.
    #[serde(rename = "distancia")]
    pub distance_km: f64,

    /// Short headline for the alert.
    #[serde(rename = "titulo")]
    pub title: String,

    /// Human-readable place description (street, district).
    #[serde(rename = "ubicacion")]
    pub location: String,

    /// Full alert message.
    #[serde(rename = "mensaje")]
    pub message: String,
}

impl TrafficNotification {
    /// The identity under which repeated pushes of this alert are deduped.
    pub fn dedup_key(&self) -> (i64, String) {
        (self.id, self.kind.clone())
    }

    /// The visual tier for rendering this alert, derived from its danger
    /// level.
    pub fn danger_tier(&self) -> TrafficLevel {
        TrafficLevel::from_danger_level(self.danger_level)
    }
}

/// Visual severity tier used by the presentation sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficLevel {
    /// Traffic is flowing; nothing nearby.
    Good,
    /// A few incidents nearby.
    Warning,
    /// High congestion or a critical incident.
    Danger,
}

impl TrafficLevel {
    /// Maps a nearby-report count onto a tier: `0` is good, `1..=2` warrants
    /// a warning, three or more is danger.
    pub fn from_report_count(count: u32) -> Self {
        match count {
            0 => TrafficLevel::Good,
            1..=2 => TrafficLevel::Warning,
            _ => TrafficLevel::Danger,
        }
    }

    /// Maps a notification danger level (1..=4) onto a tier.
    pub fn from_danger_level(level: u8) -> Self {
        match level {
            0 | 1 => TrafficLevel::Good,
            2 => TrafficLevel::Warning,
            _ => TrafficLevel::Danger,
        }
    }

    /// Short lowercase label, convenient for log fields and rendering.
    pub fn label(&self) -> &'static str {
        match self {
            TrafficLevel::Good => "good",
            TrafficLevel::Warning => "warning",
            TrafficLevel::Danger => "danger",
        }
    }
}

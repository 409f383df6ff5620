//! Traffic statistics snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A read-only snapshot of nearby traffic activity, fetched after each
/// location push. Never mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficStats {
    /// Number of recent incident reports near the user.
    #[serde(rename = "reportes_cercanos")]
    pub nearby_reports: u32,

    /// The notification radius configured on the backend, in kilometers.
    #[serde(rename = "radio_configurado")]
    pub configured_radius_km: f64,

    /// When the backend last saw a location update from this user. `null`
    /// until the first push lands.
    #[serde(rename = "ultima_actualizacion", default)]
    pub last_updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_deserializes_wire_names() {
        let json = serde_json::json!({
            "reportes_cercanos": 2,
            "radio_configurado": 5.0,
            "ultima_actualizacion": "2024-06-01T12:00:00Z"
        });

        let stats: TrafficStats = serde_json::from_value(json).unwrap();
        assert_eq!(stats.nearby_reports, 2);
        assert_eq!(stats.configured_radius_km, 5.0);
        assert!(stats.last_updated_at.is_some());
    }

    #[test]
    fn test_stats_tolerates_null_timestamp() {
        let json = serde_json::json!({
            "reportes_cercanos": 0,
            "radio_configurado": 2.5,
            "ultima_actualizacion": null
        });

        let stats: TrafficStats = serde_json::from_value(json).unwrap();
        assert_eq!(stats.last_updated_at, None);
    }
}

//! Notification settings owned by the tracking loop.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{
    deserialize_duration_from_seconds, serialize_duration_to_seconds,
    serialize_opt_duration_to_seconds,
};

/// Default reporting frequency when the backend does not provide one.
fn default_update_frequency() -> Duration {
    Duration::from_secs(30)
}

/// Per-user notification settings, fetched once at startup and mutated by
/// explicit update calls.
///
/// Updates are merged locally before the backend acknowledges them; a failed
/// acknowledgement is logged but not rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Whether location sampling and alerting is enabled.
    #[serde(rename = "notificaciones_activas")]
    pub active: bool,

    /// How often the periodic timer re-pushes the last known location.
    #[serde(
        rename = "frecuencia_actualizacion",
        default = "default_update_frequency",
        deserialize_with = "deserialize_duration_from_seconds",
        serialize_with = "serialize_duration_to_seconds"
    )]
    pub update_frequency: Duration,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { active: false, update_frequency: default_update_frequency() }
    }
}

/// A partial settings update. `None` fields are omitted from the wire so the
/// backend only touches what the client changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigPatch {
    /// New value for the active flag, if it changed.
    #[serde(rename = "notificaciones_activas", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    /// New reporting frequency, if it changed.
    #[serde(
        rename = "frecuencia_actualizacion",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_duration_to_seconds"
    )]
    pub update_frequency: Option<Duration>,
}

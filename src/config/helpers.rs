//! Serde helpers shared by configuration and wire models.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer};

/// Deserializes a `Duration` from a plain number of seconds.
pub fn deserialize_duration_from_seconds<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = u64::deserialize(deserializer)?;
    Ok(Duration::from_secs(secs))
}

/// Serializes a `Duration` as a plain number of seconds.
pub fn serialize_duration_to_seconds<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(duration.as_secs())
}

/// Serializes an optional `Duration` as seconds. Callers are expected to pair
/// this with `skip_serializing_if = "Option::is_none"`.
pub fn serialize_opt_duration_to_seconds<S>(
    duration: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match duration {
        Some(duration) => serializer.serialize_u64(duration.as_secs()),
        None => serializer.serialize_none(),
    }
}

/// Deserializes a `Duration` from a number of milliseconds.
pub fn deserialize_duration_from_ms<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let ms = u64::deserialize(deserializer)?;
    Ok(Duration::from_millis(ms))
}

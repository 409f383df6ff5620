//! Data models for the tracking client.

mod location;
mod notification;
mod settings;
mod stats;

pub use location::LocationSample;
pub use notification::{TrafficLevel, TrafficNotification};
pub use settings::{ConfigPatch, NotificationConfig};
pub use stats::TrafficStats;

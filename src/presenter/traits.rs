//! The rendering surface consumed by the tracking loop.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::models::{TrafficLevel, TrafficNotification, TrafficStats};

/// Tone of a status-bar message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Neutral progress information.
    Info,
    /// An operation completed.
    Success,
    /// A transient failure the user may want to know about.
    Error,
}

/// A rendering surface for tracker output.
///
/// The tracker calls these with fully-formed data; implementations own all
/// styling. Rendering must never fail the caller; implementations swallow
/// and log their own faults (an unsupported sound device, for instance).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Presenter: Send + Sync {
    /// Updates the one-line location status indicator.
    async fn render_status_text(&self, message: &str, kind: StatusKind);

    /// Updates the pending-notification badge. Zero hides the badge.
    async fn render_badge_count(&self, count: usize);

    /// Renders the traffic statistics summary with its visual tier.
    async fn render_traffic_summary(&self, stats: &TrafficStats, level: TrafficLevel);

    /// Shows a transient alert toast. Implementations may also play a sound
    /// or vibrate where the platform allows it.
    async fn render_notification_toast(&self, notification: &TrafficNotification, level: TrafficLevel);

    /// Reflects whether notifications are enabled on the bell icon.
    async fn set_notification_icon(&self, active: bool);
}

//! Console rendering of tracker output.

use async_trait::async_trait;

use super::traits::{Presenter, StatusKind};
use crate::models::{TrafficLevel, TrafficNotification, TrafficStats};

/// A presenter that renders to standard output.
#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl ConsolePresenter {
    /// Creates a new console presenter.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Presenter for ConsolePresenter {
    async fn render_status_text(&self, message: &str, kind: StatusKind) {
        let tag = match kind {
            StatusKind::Info => "info",
            StatusKind::Success => "ok",
            StatusKind::Error => "error",
        };
        println!("[{tag}] {message}");
    }

    async fn render_badge_count(&self, count: usize) {
        if count > 0 {
            println!("[badge] {count} pending notification(s)");
        }
    }

    async fn render_traffic_summary(&self, stats: &TrafficStats, level: TrafficLevel) {
        let headline = match level {
            TrafficLevel::Good => "Traffic is flowing in your area",
            TrafficLevel::Warning => "Caution: incidents reported nearby",
            TrafficLevel::Danger => "Heavy congestion nearby",
        };
        let updated = stats
            .last_updated_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "never".to_string());
        println!(
            "=== Traffic summary ({}) ===\n{headline}\n{} report(s) within {:.1} km, last update {updated}\n",
            level.label(),
            stats.nearby_reports,
            stats.configured_radius_km,
        );
    }

    async fn render_notification_toast(
        &self,
        notification: &TrafficNotification,
        level: TrafficLevel,
    ) {
        println!(
            "=== Traffic alert ({}) ===\n{} [{:.1} km]\n{}\n{}\n",
            level.label(),
            notification.title,
            notification.distance_km,
            notification.location,
            notification.message,
        );
    }

    async fn set_notification_icon(&self, active: bool) {
        let state = if active { "on" } else { "off" };
        println!("[icon] notifications {state}");
    }
}

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    models::{TrafficLevel, TrafficNotification, TrafficStats},
    presenter::{Presenter, StatusKind},
};

/// One rendering call observed by a [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    /// A status-bar update.
    Status(String, StatusKind),
    /// A badge-count update.
    Badge(usize),
    /// A traffic summary render, by report count and tier.
    Summary(u32, TrafficLevel),
    /// A toast, by report id and tier.
    Toast(i64, TrafficLevel),
    /// A bell-icon update.
    Icon(bool),
}

/// A presenter that records every rendering call for later assertions.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<PresenterEvent>>,
}

impl RecordingPresenter {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events, in call order.
    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events.lock().expect("presenter event lock poisoned").clone()
    }

    fn record(&self, event: PresenterEvent) {
        self.events.lock().expect("presenter event lock poisoned").push(event);
    }
}

#[async_trait]
impl Presenter for RecordingPresenter {
    async fn render_status_text(&self, message: &str, kind: StatusKind) {
        self.record(PresenterEvent::Status(message.to_string(), kind));
    }

    async fn render_badge_count(&self, count: usize) {
        self.record(PresenterEvent::Badge(count));
    }

    async fn render_traffic_summary(&self, stats: &TrafficStats, level: TrafficLevel) {
        self.record(PresenterEvent::Summary(stats.nearby_reports, level));
    }

    async fn render_notification_toast(
        &self,
        notification: &TrafficNotification,
        level: TrafficLevel,
    ) {
        self.record(PresenterEvent::Toast(notification.id, level));
    }

    async fn set_notification_icon(&self, active: bool) {
        self.record(PresenterEvent::Icon(active));
    }
}

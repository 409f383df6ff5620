//! The location tracking loop.
//!
//! A single task owns all tracking state and multiplexes four inputs: a
//! command channel (toggle, forced refresh), the position event channel fed
//! by the standing watch and one-shot requests, the periodic re-report
//! timer, and the shutdown token. State transitions are therefore free of
//! locks; handles communicate with the loop only through commands.

mod dedup;

pub use dedup::{COOL_DOWN, NotificationGate};

use std::sync::Arc;

use chrono::Utc;
use tokio::{
    sync::mpsc,
    time::{Instant, Interval, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{
    api::TrafficApi,
    models::{ConfigPatch, LocationSample, NotificationConfig, TrafficLevel},
    presenter::{Presenter, StatusKind},
    providers::{LocationSource, PositionError, WatchHandle},
};

/// Commands accepted by the tracking loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerCommand {
    /// Flip notifications on or off and persist the change.
    Toggle,
    /// Request one fresh fix immediately, outside the timer cadence.
    ForceRefresh,
}

/// Cloneable handle for sending commands into a running tracking loop.
#[derive(Debug, Clone)]
pub struct TrackerHandle {
    commands: mpsc::Sender<TrackerCommand>,
}

impl TrackerHandle {
    /// Flips notifications on or off.
    pub async fn toggle_notifications(&self) {
        if self.commands.send(TrackerCommand::Toggle).await.is_err() {
            tracing::warn!("Tracking loop is no longer running; toggle ignored.");
        }
    }

    /// Requests an immediate location refresh.
    pub async fn force_refresh(&self) {
        if self.commands.send(TrackerCommand::ForceRefresh).await.is_err() {
            tracing::warn!("Tracking loop is no longer running; refresh ignored.");
        }
    }
}

/// The tracking loop state machine.
///
/// Created inactive; [`LocationTracker::run`] fetches the user's settings
/// and starts tracking when they say so. While tracking, every position fix
/// is reported to the backend and the response's notifications pass through
/// the dedup gate before rendering.
pub struct LocationTracker {
    api: Arc<dyn TrafficApi>,
    source: Arc<LocationSource>,
    presenter: Arc<dyn Presenter>,
    gate: NotificationGate,
    config: NotificationConfig,
    current: Option<LocationSample>,
    watch: Option<WatchHandle>,
    interval: Option<Interval>,
    events_tx: mpsc::Sender<Result<LocationSample, PositionError>>,
    events_rx: mpsc::Receiver<Result<LocationSample, PositionError>>,
    commands_rx: mpsc::Receiver<TrackerCommand>,
    cancel: CancellationToken,
}

impl LocationTracker {
    /// Creates the tracker and the command handle paired with it.
    pub fn new(
        api: Arc<dyn TrafficApi>,
        source: Arc<LocationSource>,
        presenter: Arc<dyn Presenter>,
        cancel: CancellationToken,
    ) -> (Self, TrackerHandle) {
        let (commands_tx, commands_rx) = mpsc::channel(8);
        let (events_tx, events_rx) = mpsc::channel(16);
        let tracker = Self {
            api,
            source,
            presenter,
            gate: NotificationGate::new(),
            config: NotificationConfig::default(),
            current: None,
            watch: None,
            interval: None,
            events_tx,
            events_rx,
            commands_rx,
            cancel,
        };
        (tracker, TrackerHandle { commands: commands_tx })
    }

    /// Runs the loop until the cancellation token fires.
    pub async fn run(mut self) {
        self.initialize().await;

        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => break,

                Some(command) = self.commands_rx.recv() => {
                    self.handle_command(command).await;
                }

                Some(event) = self.events_rx.recv() => {
                    self.handle_event(event).await;
                }

                _ = Self::tick(&mut self.interval) => {
                    self.push_current().await;
                }
            }
        }

        self.stop_tracking();
        tracing::info!("Location tracker shut down.");
    }

    /// Resolves on the next timer tick, or never while the timer is off.
    async fn tick(interval: &mut Option<Interval>) {
        match interval {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending().await,
        }
    }

    /// Fetches the user's settings and starts tracking if they enable it.
    /// A fetch failure leaves the tracker inactive with defaults.
    async fn initialize(&mut self) {
        self.presenter
            .render_status_text("Loading notification settings", StatusKind::Info)
            .await;

        match self.api.fetch_config().await {
            Ok(config) => {
                tracing::info!(
                    active = config.active,
                    frequency_secs = config.update_frequency.as_secs(),
                    "Loaded notification settings."
                );
                self.config = config;
            }
            Err(error) => {
                tracing::error!(
                    error = %error,
                    "Failed to load notification settings; notifications stay off."
                );
                self.presenter
                    .render_status_text("Could not load notification settings", StatusKind::Error)
                    .await;
            }
        }

        self.presenter.set_notification_icon(self.config.active).await;
        if self.config.active {
            self.start_tracking().await;
        }
    }

    /// Starts the one-shot fetch, the standing watch and the re-report
    /// timer. Safe to call while already tracking: the previous watch and
    /// timer are torn down first.
    async fn start_tracking(&mut self) {
        self.stop_tracking();
        self.presenter.render_status_text("Acquiring location", StatusKind::Info).await;

        self.dispatch_one_shot();
        self.watch = Some(self.source.subscribe(self.events_tx.clone()));

        let period = self.config.update_frequency;
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);

        tracing::info!(period_secs = period.as_secs(), "Location tracking started.");
    }

    /// Tears down the watch and the timer. Idempotent.
    fn stop_tracking(&mut self) {
        // Dropping the handle cancels the watch task.
        if self.watch.take().is_some() {
            tracing::info!("Location tracking stopped.");
        }
        self.interval = None;
    }

    /// Requests one fix under the one-shot policy; the result arrives on the
    /// event channel like any watch fix.
    fn dispatch_one_shot(&self) {
        let source = Arc::clone(&self.source);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = source.get_once().await;
            // The loop may have shut down while we were waiting.
            let _ = events.send(result).await;
        });
    }

    async fn handle_command(&mut self, command: TrackerCommand) {
        match command {
            TrackerCommand::Toggle => self.toggle().await,
            TrackerCommand::ForceRefresh => {
                self.presenter.render_status_text("Refreshing location", StatusKind::Info).await;
                self.dispatch_one_shot();
            }
        }
    }

    /// Flips the active flag, applies it locally and tells the backend. The
    /// local flip is not rolled back on a persistence failure.
    async fn toggle(&mut self) {
        self.config.active = !self.config.active;

        if self.config.active {
            self.start_tracking().await;
        } else {
            self.stop_tracking();
            self.presenter.render_status_text("Notifications disabled", StatusKind::Info).await;
        }
        self.presenter.set_notification_icon(self.config.active).await;

        let patch = ConfigPatch { active: Some(self.config.active), ..Default::default() };
        if let Err(error) = self.api.update_config(&patch).await {
            tracing::warn!(error = %error, "Failed to persist the notification toggle.");
        }
    }

    async fn handle_event(&mut self, event: Result<LocationSample, PositionError>) {
        match event {
            Ok(sample) => {
                self.current = Some(sample.clone());
                self.presenter.render_status_text("Location updated", StatusKind::Success).await;
                self.report(&sample).await;
            }
            Err(error) => {
                tracing::warn!(error = %error, "Position acquisition failed.");
                self.presenter
                    .render_status_text(error.status_message(), StatusKind::Error)
                    .await;
            }
        }
    }

    /// Timer tick: re-report the last known position. Before the first fix
    /// there is nothing to report.
    async fn push_current(&mut self) {
        match self.current.clone() {
            Some(sample) => self.report(&sample).await,
            None => tracing::debug!("Report timer fired before the first fix."),
        }
    }

    /// Reports one position to the backend and renders what comes back. The
    /// badge reflects the full response; only gate-approved notifications
    /// become toasts.
    async fn report(&mut self, sample: &LocationSample) {
        let notifications = match self.api.push_location(sample).await {
            Ok(notifications) => notifications,
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    "Failed to report location; the next fix or tick retries."
                );
                return;
            }
        };

        let pending = notifications.len();
        let approved = self.gate.filter_batch(&notifications, Utc::now());
        tracing::debug!(
            received = pending,
            approved = approved.len(),
            "Processed location report response."
        );

        for notification in approved {
            self.presenter
                .render_notification_toast(notification, notification.danger_tier())
                .await;
        }
        self.presenter.render_badge_count(pending).await;
        self.refresh_traffic_summary().await;
    }

    /// Re-renders the area statistics. On failure the previous summary stays
    /// in place.
    async fn refresh_traffic_summary(&self) {
        match self.api.fetch_stats().await {
            Ok(stats) => {
                let level = TrafficLevel::from_report_count(stats.nearby_reports);
                self.presenter.render_traffic_summary(&stats, level).await;
            }
            Err(error) => {
                tracing::warn!(error = %error, "Failed to refresh traffic statistics.");
            }
        }
    }

    #[cfg(test)]
    fn is_tracking(&self) -> bool {
        self.watch.is_some() && self.interval.is_some()
    }

    #[cfg(test)]
    fn watch_token(&self) -> Option<tokio_util::sync::CancellationToken> {
        self.watch.as_ref().map(|handle| handle.token())
    }
}

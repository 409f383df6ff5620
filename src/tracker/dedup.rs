//! Suppression of repeated notifications.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::models::TrafficNotification;

/// Minimum time between two displays of the same notification identity.
pub const COOL_DOWN: Duration = Duration::seconds(300);

/// Decides whether an incoming notification should be shown, based on a
/// cool-down window keyed by `(id, kind)`.
///
/// Check-and-record is a single step behind `&mut self`: a `true` result has
/// already recorded the display time, so no caller can observe a stale entry
/// between the check and the record. Suppressed notifications leave no
/// user-visible trace.
pub struct NotificationGate {
    window: Duration,
    last_shown: HashMap<(i64, String), DateTime<Utc>>,
}

impl NotificationGate {
    /// Creates a gate with the standard 5-minute cool-down.
    pub fn new() -> Self {
        Self::with_window(COOL_DOWN)
    }

    /// Creates a gate with a custom cool-down window.
    pub fn with_window(window: Duration) -> Self {
        Self { window, last_shown: HashMap::new() }
    }

    /// Returns true iff `notification` has not been shown within the
    /// cool-down window, recording `now` as its display time when it has
    /// not. A `false` result changes no state.
    pub fn should_show(&mut self, notification: &TrafficNotification, now: DateTime<Utc>) -> bool {
        let key = notification.dedup_key();
        if let Some(last_shown) = self.last_shown.get(&key) {
            if now - *last_shown < self.window {
                return false;
            }
        }
        self.last_shown.insert(key, now);
        true
    }

    /// Evaluates a whole backend response batch in arrival order, returning
    /// the approved notifications in that same order.
    ///
    /// Entries whose display time has aged beyond the window are swept first;
    /// an expired entry decides identically to a missing one, so this only
    /// bounds the map.
    pub fn filter_batch<'a>(
        &mut self,
        batch: &'a [TrafficNotification],
        now: DateTime<Utc>,
    ) -> Vec<&'a TrafficNotification> {
        self.sweep(now);
        batch.iter().filter(|n| self.should_show(n, now)).collect()
    }

    /// Drops entries older than the cool-down window.
    fn sweep(&mut self, now: DateTime<Utc>) {
        let window = self.window;
        self.last_shown.retain(|_, shown| now - *shown < window);
    }

    /// Number of identities currently inside their cool-down window.
    pub fn tracked(&self) -> usize {
        self.last_shown.len()
    }
}

impl Default for NotificationGate {
    fn default() -> Self {
        Self::new()
    }
}

//! Adapter over a [`PositionBackend`] that applies the one-shot and watch
//! acquisition policies (timeouts and cached-fix tolerance) and exposes the
//! watch as a cancellable subscription.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::{
    sync::{Mutex, mpsc},
    time::MissedTickBehavior,
};
use tokio_util::sync::CancellationToken;

use super::traits::{PositionBackend, PositionError};
use crate::models::LocationSample;

/// Acquisition policy for a position request.
#[derive(Debug, Clone, Copy)]
pub struct PositionOptions {
    /// How long to wait for the backend before giving up.
    pub timeout: Duration,
    /// A cached fix no older than this is acceptable and avoids a fresh
    /// backend call.
    pub maximum_age: Duration,
}

impl PositionOptions {
    /// Policy for one-shot requests (startup fetch, forced refresh).
    pub const ONE_SHOT: PositionOptions =
        PositionOptions { timeout: Duration::from_secs(10), maximum_age: Duration::from_secs(60) };

    /// Policy for each attempt of the standing watch.
    pub const WATCH: PositionOptions =
        PositionOptions { timeout: Duration::from_secs(15), maximum_age: Duration::from_secs(30) };
}

/// Cancellation handle for a standing watch subscription.
///
/// Dropping the handle cancels the subscription; the polling task exits and
/// its channel closes.
#[derive(Debug)]
pub struct WatchHandle {
    token: CancellationToken,
}

impl WatchHandle {
    /// Cancels the subscription explicitly.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the subscription has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// The location source consumed by the tracking loop.
///
/// Wraps a platform backend with the acquisition policies above and a shared
/// most-recent-fix cache.
pub struct LocationSource {
    backend: Arc<dyn PositionBackend>,
    cache: Arc<Mutex<Option<LocationSample>>>,
    poll_interval: Duration,
}

impl LocationSource {
    /// Creates a new source over `backend`. `poll_interval` is the cadence
    /// of the standing watch.
    pub fn new(backend: Arc<dyn PositionBackend>, poll_interval: Duration) -> Self {
        Self { backend, cache: Arc::new(Mutex::new(None)), poll_interval }
    }

    /// Verifies the backend capability. `Unsupported` here is fatal to the
    /// whole component.
    pub async fn probe(&self) -> Result<(), PositionError> {
        self.backend.probe().await
    }

    /// Obtains a single fix under the one-shot policy.
    pub async fn get_once(&self) -> Result<LocationSample, PositionError> {
        acquire(self.backend.as_ref(), &self.cache, &PositionOptions::ONE_SHOT).await
    }

    /// Starts a standing watch that forwards fixes and errors into `events`.
    ///
    /// The returned handle cancels the watch when dropped. The first attempt
    /// fires immediately; subsequent attempts follow the poll cadence.
    pub fn subscribe(
        &self,
        events: mpsc::Sender<Result<LocationSample, PositionError>>,
    ) -> WatchHandle {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let backend = Arc::clone(&self.backend);
        let cache = Arc::clone(&self.cache);
        let poll_interval = self.poll_interval;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;

                    _ = task_token.cancelled() => break,

                    _ = interval.tick() => {
                        let result =
                            acquire(backend.as_ref(), &cache, &PositionOptions::WATCH).await;
                        if events.send(result).await.is_err() {
                            // Receiver gone; the subscriber has shut down.
                            break;
                        }
                    }
                }
            }
            tracing::debug!("Location watch task exited.");
        });

        WatchHandle { token }
    }
}

/// One acquisition attempt: serve from cache when fresh enough, otherwise
/// ask the backend under the policy's timeout.
async fn acquire(
    backend: &dyn PositionBackend,
    cache: &Mutex<Option<LocationSample>>,
    options: &PositionOptions,
) -> Result<LocationSample, PositionError> {
    let now = Utc::now();
    {
        let cached = cache.lock().await;
        if let Some(sample) = cached.as_ref() {
            let fresh = sample
                .age(now)
                .to_std()
                .map(|age| age <= options.maximum_age)
                .unwrap_or(false);
            if fresh {
                return Ok(sample.clone());
            }
        }
    }

    match tokio::time::timeout(options.timeout, backend.fix()).await {
        Ok(Ok(sample)) => {
            *cache.lock().await = Some(sample.clone());
            Ok(sample)
        }
        Ok(Err(error)) => Err(error),
        Err(_) => Err(PositionError::Timeout),
    }
}

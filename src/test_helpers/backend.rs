use std::{
    collections::VecDeque,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    models::LocationSample,
    providers::{PositionBackend, PositionError},
};

/// A position backend that replays a scripted sequence of fix outcomes.
///
/// Each `fix` call consumes the next script entry; once the script is
/// exhausted, further calls report the position as unavailable.
pub struct ScriptedPositionBackend {
    script: Mutex<VecDeque<Result<LocationSample, PositionError>>>,
    calls: AtomicUsize,
}

impl ScriptedPositionBackend {
    /// Creates a backend that replays `script` in order.
    pub fn new(script: Vec<Result<LocationSample, PositionError>>) -> Self {
        Self { script: Mutex::new(script.into()), calls: AtomicUsize::new(0) }
    }

    /// Number of `fix` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PositionBackend for ScriptedPositionBackend {
    async fn fix(&self) -> Result<LocationSample, PositionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(PositionError::Unavailable("script exhausted".to_string())))
    }
}

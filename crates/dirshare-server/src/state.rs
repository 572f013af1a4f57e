//! Shared handler state.

use crate::config::DEFAULT_MAX_UPLOAD_SIZE;
use dirshare_core::BrowseConfig;
use dirshare_core::Root;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

/// Moment the server started, for the uptime display.
#[derive(Debug, Clone, Copy)]
pub struct StartTime(Instant);

impl StartTime {
    /// Captures the current instant.
    #[must_use]
    pub fn now() -> Self {
        Self(Instant::now())
    }

    /// Time elapsed since start.
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.0.elapsed()
    }
}

/// State shared by every handler.
///
/// All fields are immutable after startup; cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The confinement root.
    pub root: Arc<Root>,
    /// Listing, resolution and archive settings.
    pub config: Arc<BrowseConfig>,
    /// Server start time.
    pub started: StartTime,
    /// Largest accepted request body in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Creates state for `root`, starting the uptime clock now.
    #[must_use]
    pub fn new(root: Root, config: BrowseConfig) -> Self {
        Self {
            root: Arc::new(root),
            config: Arc::new(config),
            started: StartTime::now(),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }

    /// Sets the request body limit.
    #[must_use]
    pub fn with_max_upload_size(mut self, bytes: u64) -> Self {
        self.max_upload_size = bytes;
        self
    }

    /// Body limit as accepted by axum.
    pub(crate) fn body_limit(&self) -> usize {
        usize::try_from(self.max_upload_size).unwrap_or(usize::MAX)
    }
}

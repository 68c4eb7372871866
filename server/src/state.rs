//! Application state for the prediction server
//!
//! Holds the loaded model behind an `Arc`. The predictor is immutable
//! after startup, so concurrent request handlers read it without locking.

use std::sync::Arc;
use std::time::Instant;

use trafficsign_net::backend::DefaultBackend;
use trafficsign_net::Predictor;

/// Shared application state
pub struct AppState {
    /// The predictor wrapping the pretrained model, loaded once at startup
    pub predictor: Predictor<DefaultBackend>,
    /// Server start time
    pub started_at: Instant,
}

impl AppState {
    pub fn new(predictor: Predictor<DefaultBackend>) -> Self {
        Self {
            predictor,
            started_at: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

pub type SharedState = Arc<AppState>;

//! Per-client sliding-window rate limiting
//!
//! Counts request instants inside a trailing window and rejects immediately
//! once the ceiling is reached. Rejected attempts are not queued and not
//! recorded. State is in-memory and per-process: it resets on restart and
//! does not coordinate across instances, which is an accepted limitation.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use log::debug;

use crate::error::AuditError;

/// Sliding-window request budget, keyed by client identity.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Vec<Instant>>>,
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    /// Create a limiter admitting `limit` requests per client per `window`.
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            limit,
            window,
        }
    }

    /// Admit or reject a request for `client_id`.
    ///
    /// Instants older than the window are purged first; if the remaining
    /// count has reached the ceiling the attempt fails and is NOT recorded,
    /// so hammering a saturated window never extends the lockout.
    pub fn check_and_record(&self, client_id: &str) -> Result<(), AuditError> {
        let now = Instant::now();
        let mut windows = self.windows.lock().expect("rate limiter lock poisoned");

        let requests = windows.entry(client_id.to_string()).or_default();
        requests.retain(|t| now.duration_since(*t) < self.window);

        if requests.len() >= self.limit {
            debug!(
                "Rate limit hit for client {client_id}: {} requests in window",
                requests.len()
            );
            return Err(AuditError::RateLimitExceeded {
                limit: self.limit,
                window_secs: self.window.as_secs(),
            });
        }

        requests.push(now);
        Ok(())
    }

    /// Number of clients currently tracked.
    pub fn entries(&self) -> usize {
        self.windows.lock().expect("rate limiter lock poisoned").len()
    }

    /// Drop all tracked windows.
    pub fn clear(&self) {
        self.windows
            .lock()
            .expect("rate limiter lock poisoned")
            .clear();
    }
}

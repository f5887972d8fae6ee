//! Fixed-window request-budget enforcement per client key.
//!
//! Counters live in a `DashMap`; the map's entry guard gives exclusive
//! access to one key's slot, so two concurrent requests from the same
//! client cannot both be admitted past the quota mid-window. At a window
//! boundary a client may land up to one extra burst (standard fixed-window
//! tolerance).

use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Per-client counter for the current window.
#[derive(Debug)]
struct WindowSlot {
    window_start: Instant,
    count: u32,
}

/// Fixed-window rate limiter keyed by client identity.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    slots: DashMap<String, WindowSlot>,
}

impl FixedWindowLimiter {
    /// Create a limiter admitting `max_requests` per `window` per client.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            slots: DashMap::new(),
        }
    }

    /// Admit or reject one request for `client_key`.
    pub fn allow(&self, client_key: &str) -> bool {
        let mut slot = self
            .slots
            .entry(client_key.to_string())
            .or_insert_with(|| WindowSlot {
                window_start: Instant::now(),
                count: 0,
            });

        if slot.window_start.elapsed() >= self.window {
            slot.window_start = Instant::now();
            slot.count = 0;
        }

        if slot.count < self.max_requests {
            slot.count += 1;
            true
        } else {
            false
        }
    }

    /// The window length, exposed so the API layer can emit a retry hint.
    pub fn window(&self) -> Duration {
        self.window
    }
}

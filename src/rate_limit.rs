use dashmap::DashMap;
use std::sync::Arc;
use tokio::time::{Duration, Instant, interval};

use crate::metrics::RATE_LIMIT_KEYS;

// Rate limit entry - tracks requests per IP/key within one window
pub struct RateLimitEntry {
    pub count: u32,
    pub window_end: Instant,
}

// Fixed-window request counter, keyed by client address.
// Per-process and in-memory only: counts reset on restart.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    entries: DashMap<String, RateLimitEntry>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            entries: DashMap::new(),
        }
    }

    // Count one request for `key`. Returns true when the caller is over
    // its limit for the current window.
    pub fn check_and_record(&self, key: &str) -> bool {
        let now = Instant::now();

        // entry() keeps the shard locked while we hold the guard, so the
        // check-increment below can't lose updates between callers
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert(RateLimitEntry {
                count: 0,
                window_end: now,
            });

        // window over..? start a fresh one
        if now >= entry.window_end {
            entry.count = 1;
            entry.window_end = now + self.window;
            return false;
        }

        // over-limit traffic still counts; only the window reset clears it
        entry.count = entry.count.saturating_add(1);
        entry.count > self.max_requests
    }

    // Drop every entry whose window has already ended. Admission decisions
    // don't depend on this, it only keeps abandoned keys from piling up.
    pub fn sweep_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.window_end > now);
    }

    pub fn tracked_keys(&self) -> usize {
        self.entries.len()
    }
}

// Background sweep - runs every `period` for the life of the process
pub async fn sweeper(limiter: Arc<RateLimiter>, period: Duration) {
    let mut interval = interval(period);

    println!("Rate limit sweeper started (interval: {:?})", period);

    loop {
        interval.tick().await;
        limiter.sweep_expired();
        RATE_LIMIT_KEYS.set(limiter.tracked_keys() as f64);
    }
}

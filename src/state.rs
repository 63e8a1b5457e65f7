use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use crate::cache::CacheEntry;
use crate::rate_limit::RateLimiter;
// app's shared state

pub struct AppState {
    pub client: reqwest::Client,
    pub cache: DashMap<String, CacheEntry>, // cache key -> CacheEntry
    pub ttl: Duration,                      // how long cached summaries stay valid
    pub upstream_url: String,
    pub model: String,
    pub api_token: Option<String>,
    pub upstream_timeout: Duration,
    pub rate_limiter: Arc<RateLimiter>,
}

use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("summarizer_requests_total", "Total number of requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "summarizer_rate_limited_total",
        "Requests rejected by the rate limiter"
    )
    .unwrap();
    pub static ref CACHE_HITS: Counter =
        register_counter!("summarizer_cache_hits_total", "Total cache hits").unwrap();
    pub static ref CACHE_MISSES: Counter =
        register_counter!("summarizer_cache_misses_total", "Total cache misses").unwrap();
    pub static ref UPSTREAM_ERRORS: Counter = register_counter!(
        "summarizer_upstream_errors_total",
        "Failed calls to the inference service"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "summarizer_request_latency_seconds",
        "Request latency in seconds"
    )
    .unwrap();
    pub static ref CACHE_SIZE: Gauge =
        register_gauge!("summarizer_cache_size", "Current number of items in cache").unwrap();
    pub static ref RATE_LIMIT_KEYS: Gauge = register_gauge!(
        "summarizer_rate_limit_keys",
        "Client keys currently tracked by the rate limiter"
    )
    .unwrap();
}

use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("diagnose_requests_total", "Total number of diagnose requests").unwrap();
    pub static ref RATE_LIMITED: Counter =
        register_counter!("diagnose_rate_limited_total", "Requests rejected by the rate limiter").unwrap();
    pub static ref UPSTREAM_ERRORS: Counter =
        register_counter!("diagnose_upstream_errors_total", "Gemini calls that failed or returned non-success").unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "diagnose_request_latency_seconds",
        "Latency of forwarded requests in seconds"
    )
    .unwrap();
    pub static ref RATE_LIMIT_KEYS: Gauge =
        register_gauge!("diagnose_rate_limit_keys", "Client keys tracked by the rate limiter").unwrap();
}

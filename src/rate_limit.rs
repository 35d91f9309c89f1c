use dashmap::DashMap;

// Rate limit entry - request timestamps (ms since epoch) per client key
#[derive(Debug, Default)]
pub struct RateLimitEntry {
    pub timestamps: Vec<i64>,
}

impl RateLimitEntry {
    // drop everything that fell out of the trailing window
    fn prune(&mut self, now: i64, window_ms: i64) {
        self.timestamps.retain(|&ts| now - ts < window_ms);
    }
}

// Sliding window limiter, lives as long as the process
pub struct RateLimiter {
    entries: DashMap<String, RateLimitEntry>,
    limit: usize,
    window_ms: i64,
}

impl RateLimiter {
    pub fn new(limit: usize, window_ms: i64) -> Self {
        Self {
            entries: DashMap::new(),
            limit,
            window_ms,
        }
    }

    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, chrono::Utc::now().timestamp_millis())
    }

    // the entry guard keeps the shard locked for prune + check + push,
    // rejected requests are not recorded
    pub fn check_at(&self, key: &str, now: i64) -> bool {
        let mut entry = self.entries.entry(key.to_string()).or_default();

        entry.prune(now, self.window_ms);

        // at or over the ceiling
        if entry.timestamps.len() >= self.limit {
            return false;
        }

        entry.timestamps.push(now);
        true
    }

    // number of keys ever seen (entries are never removed)
    pub fn tracked_keys(&self) -> usize {
        self.entries.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn window_ms(&self) -> i64 {
        self.window_ms
    }
}

use clap::Parser;
use std::time::Duration;

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "diagnose-gateway")]
#[command(about = "Rate-limited diagnosis proxy in front of the Gemini API")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8888)]
    pub port: u16,

    // Gemini API key, requests fail with 500 while it is missing
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    // Upstream base url (scheme + host)
    #[arg(long, env = "GEMINI_BASE_URL", default_value = "https://generativelanguage.googleapis.com")]
    pub upstream_url: String,

    // Model identifier embedded in the upstream path
    #[arg(short, long, env = "GEMINI_MODEL", default_value = "gemini-1.5-flash")]
    pub model: String,

    // Upstream request deadline in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 30)]
    pub upstream_timeout: u64,

    // Rate limit max requests per window
    #[arg(long, env = "RATE_LIMIT", default_value_t = 20)]
    pub rate_limit: usize,

    // Rate limit window in milliseconds
    #[arg(long, env = "RATE_WINDOW_MS", default_value_t = 60_000)]
    pub rate_window: i64,

    // Largest accepted request payload, measured on the re-serialized JSON
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = 5000)]
    pub max_body_bytes: usize,

    // Hard cap on the raw request body, read only after the rate limit check
    #[arg(long, env = "MAX_RAW_BODY_BYTES", default_value_t = 2 * 1024 * 1024)]
    pub max_raw_body_bytes: usize,

    // Header carrying the client address set by the fronting proxy
    #[arg(long, env = "CLIENT_IP_HEADER", default_value = "x-nf-client-connection-ip")]
    pub client_ip_header: String,
}

impl Args {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            port: 8888,
            api_key: None,
            upstream_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            upstream_timeout: 30,
            rate_limit: 20,
            rate_window: 60_000,
            max_body_bytes: 5000,
            max_raw_body_bytes: 2 * 1024 * 1024,
            client_ip_header: "x-nf-client-connection-ip".to_string(),
        }
    }
}

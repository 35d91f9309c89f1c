use crate::config::Args;
use crate::rate_limit::RateLimiter;
use crate::upstream::GeminiClient;

// app's shared state

pub struct AppState {
    pub gemini: GeminiClient,
    pub api_key: Option<String>, // checked per request, missing key is a 500
    pub rate_limiter: RateLimiter,
    pub max_body_bytes: usize,
    pub max_raw_body_bytes: usize,
    pub client_ip_header: String,
}

impl AppState {
    pub fn from_args(args: &Args) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(args.upstream_timeout())
            .build()?;

        Ok(Self {
            gemini: GeminiClient::new(client, &args.upstream_url, &args.model),
            api_key: args.api_key.clone().filter(|k| !k.is_empty()),
            rate_limiter: RateLimiter::new(args.rate_limit, args.rate_window),
            max_body_bytes: args.max_body_bytes,
            max_raw_body_bytes: args.max_raw_body_bytes,
            client_ip_header: args.client_ip_header.clone(),
        })
    }
}

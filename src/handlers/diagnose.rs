use axum::{
    Json,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method},
};
use http_body_util::LengthLimitError;
use std::sync::Arc;
use std::time::Instant;

use crate::error::ApiError;
use crate::extract::extract_sections;
use crate::metrics::{RATE_LIMIT_KEYS, RATE_LIMITED, REQUEST_LATENCY, REQUEST_TOTAL, UPSTREAM_ERRORS};
use crate::models::{DiagnoseRequest, DiagnoseResponse, GenerateContentRequest};
use crate::state::AppState;

// used when the proxy did not tell us who the client is
pub const FALLBACK_CLIENT_IP: &str = "127.0.0.1";

fn client_key<'a>(headers: &'a HeaderMap, header_name: &str) -> &'a str {
    headers
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(FALLBACK_CLIENT_IP)
}

// raw body cap, the JSON size bound is checked after parsing
async fn read_body(body: Body, limit: usize) -> Result<Bytes, ApiError> {
    axum::body::to_bytes(body, limit).await.map_err(|e| {
        let source = e.into_inner();
        if source.downcast_ref::<LengthLimitError>().is_some() {
            ApiError::PayloadTooLarge { max: limit }
        } else {
            ApiError::BodyRead(axum::Error::new(source))
        }
    })
}

// JSON -> size bound -> prompt, in that order
fn parse_payload(body: &[u8], max_bytes: usize) -> Result<DiagnoseRequest, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(ApiError::MalformedJson)?;

    if value.to_string().len() > max_bytes {
        return Err(ApiError::PayloadTooLarge { max: max_bytes });
    }

    DiagnoseRequest::from_json(&value).ok_or(ApiError::MissingPrompt)
}

async fn read_payload(body: Body, state: &AppState) -> Result<DiagnoseRequest, ApiError> {
    let body = read_body(body, state.max_raw_body_bytes).await?;
    parse_payload(&body, state.max_body_bytes)
}

//post handler, every other method is rejected before anything else runs
pub async fn diagnose_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<DiagnoseResponse>, ApiError> {
    if method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }
    REQUEST_TOTAL.inc();

    let client = client_key(&headers, &state.client_ip_header);
    let admitted = state.rate_limiter.check(client);
    RATE_LIMIT_KEYS.set(state.rate_limiter.tracked_keys() as f64);
    if !admitted {
        RATE_LIMITED.inc();
        tracing::warn!(client = %client, "Rate limit exceeded");
        return Err(ApiError::RateLimited);
    }

    let Some(api_key) = state.api_key.as_deref() else {
        tracing::error!("GEMINI_API_KEY is not configured");
        return Err(ApiError::MissingApiKey);
    };

    let request = read_payload(body, &state).await.inspect_err(|e| {
        tracing::debug!(client = %client, error = %e, "Rejected request body");
    })?;

    let upstream_request = GenerateContentRequest::from_prompt(&request.prompt, request.image());
    tracing::info!(
        client = %client,
        prompt_len = request.prompt.len(),
        has_image = request.image().is_some(),
        "Forwarding to Gemini"
    );

    let start_time = Instant::now();
    let result = state.gemini.generate_content(api_key, &upstream_request).await;
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    let reply = result.inspect_err(|e| {
        UPSTREAM_ERRORS.inc();
        if let ApiError::Internal(source) = e {
            tracing::error!(error = %source, "Diagnose request failed");
        }
    })?;

    Ok(Json(extract_sections(reply.first_text())))
}

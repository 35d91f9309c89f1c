use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use axum::body::Bytes;

// Everything the diagnose handler can fail with, one variant per status
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Too many requests. Please wait a minute and try again.")]
    RateLimited,

    #[error("Server misconfiguration: upstream API key is not set.")]
    MissingApiKey,

    #[error("Could not read request body.")]
    BodyRead(#[source] axum::Error),

    #[error("Invalid JSON body.")]
    MalformedJson(#[source] serde_json::Error),

    #[error("Request payload too large (limit is {max} bytes).")]
    PayloadTooLarge { max: usize },

    #[error("A prompt is required.")]
    MissingPrompt,

    // upstream rejected the call, body is passed through untouched
    #[error("upstream returned {status}")]
    Upstream { status: StatusCode, body: Bytes },

    #[error("An unexpected error occurred. Please try again later.")]
    Internal(#[from] UpstreamError),
}

// Failures talking to Gemini that never reach the caller in detail
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("invalid upstream url: {0}")]
    Url(#[from] url::ParseError),

    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BodyRead(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedJson(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::MissingPrompt => StatusCode::BAD_REQUEST,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Upstream { body, .. } => {
                (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
            }
            other => (status, other.to_string()).into_response(),
        }
    }
}

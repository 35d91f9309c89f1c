use url::Url;

use crate::error::{ApiError, UpstreamError};
use crate::models::{GenerateContentRequest, GenerateContentResponse};

// Gemini generateContent client, one POST per call, no retries
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(client: reqwest::Client, base_url: &str, model: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    // {base}/v1beta/models/{model}:generateContent?key={api_key}
    pub fn endpoint(&self, api_key: &str) -> Result<Url, UpstreamError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        Ok(Url::parse_with_params(&url, &[("key", api_key)])?)
    }

    // non-success keeps status + body for the caller, anything else is internal
    pub async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiError> {
        let url = self.endpoint(api_key)?;

        let res = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(UpstreamError::from)?;

        let status = res.status();
        let body = res.bytes().await.map_err(UpstreamError::from)?;

        if !status.is_success() {
            // must still be JSON, otherwise it is our failure
            let error_body: serde_json::Value =
                serde_json::from_slice(&body).map_err(UpstreamError::from)?;
            tracing::warn!(status = %status, body = %error_body, "Gemini API error");
            return Err(ApiError::Upstream { status, body });
        }

        let parsed = serde_json::from_slice(&body).map_err(UpstreamError::from)?;
        Ok(parsed)
    }
}

//! HTTP client for the description generation service.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use tubedesc_core::config::ServiceConfig;
use tubedesc_core::description::{GenerationRequest, ServiceResponse};
use tubedesc_core::submission::GenerationService;
use tubedesc_core::TubedescError;

/// Path of the generation endpoint, relative to the service base URL.
pub const GENERATE_PATH: &str = "/generate";

/// Longest slice of an unexpected body quoted back in an error.
const MAX_ERROR_BODY: usize = 200;

/// Client for the generation service API.
pub struct GenerationClient {
    client: Client,
    base_url: String,
}

impl GenerationClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn generate_url(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_PATH)
    }

    /// POST the request as JSON and decode the answer.
    #[instrument(skip(self, request), fields(video_url = %request.video_url))]
    pub async fn post_generate(
        &self,
        request: &GenerationRequest,
    ) -> anyhow::Result<ServiceResponse> {
        let url = self.generate_url();
        let resp = self.client.post(&url).json(request).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!(%status, bytes = body.len(), "Generation service answered");
        decode_response(status, &body)
    }
}

impl GenerationService for GenerationClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> tubedesc_core::Result<ServiceResponse> {
        self.post_generate(request)
            .await
            .map_err(|e| TubedescError::Transport(format!("{e:#}")))
    }
}

/// Interpret a response body.
///
/// A success status must carry either a description or an `error` field.
/// An error status is accepted only when its body carries an `error` field;
/// anything else (e.g. a framework validation report) is a transport failure.
pub fn decode_response(status: StatusCode, body: &str) -> anyhow::Result<ServiceResponse> {
    if status.is_success() {
        return Ok(serde_json::from_str(body)?);
    }
    match serde_json::from_str::<ServiceResponse>(body) {
        Ok(failure @ ServiceResponse::Failure { .. }) => Ok(failure),
        _ => anyhow::bail!("Service returned {}: {}", status, excerpt(body)),
    }
}

fn excerpt(body: &str) -> &str {
    if body.len() <= MAX_ERROR_BODY {
        return body;
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

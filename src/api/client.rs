//! HTTP client for the Section Swap matching service
//!
//! One POST per submission, no retries. The answer is classified into a
//! [`SubmissionResult`] or a [`SubmitError`] by [`classify_response`].

use super::types::SwapResponse;
use super::{SubmitError, SwapApi};
use crate::state::{MatchedParty, SubmissionResult, SwapRequest};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// Default matching service deployment
pub const DEFAULT_API_URL: &str = "https://section-swap-backend.vercel.app/api";

/// Upper bound for `/health`; submissions are never cut short
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for communicating with the matching service
#[derive(Debug, Clone)]
pub struct SwapClient {
    client: reqwest::Client,
    /// Base URL without a trailing slash
    base_url: String,
    health_timeout: Duration,
}

impl SwapClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            health_timeout: HEALTH_CHECK_TIMEOUT,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl SwapApi for SwapClient {
    async fn submit_swap_request(
        &self,
        request: &SwapRequest,
    ) -> Result<SubmissionResult, SubmitError> {
        let response = self
            .client
            .post(self.endpoint("swap-request"))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%status, bytes = body.len(), "swap request answered");

        classify_response(status, &body)
    }

    async fn check_health(&self) -> bool {
        let probe = self
            .client
            .get(self.endpoint("health"))
            .timeout(self.health_timeout)
            .send()
            .await;
        match probe {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!(status = %response.status(), "health probe failed");
                false
            }
            Err(e) => {
                tracing::warn!("health probe could not reach {}: {}", self.base_url, e);
                false
            }
        }
    }
}

/// Turn a status and raw body into the submission outcome.
///
/// Precedence: 429, then an explicit `error` field, then the match fields.
/// Outside of 429 the status itself does not decide the outcome.
pub fn classify_response(status: StatusCode, body: &str) -> Result<SubmissionResult, SubmitError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        let message = serde_json::from_str::<SwapResponse>(body)
            .ok()
            .and_then(|parsed| parsed.error_message().map(str::to_string));
        return Err(SubmitError::RateLimited { message });
    }

    let parsed: SwapResponse = serde_json::from_str(body)
        .map_err(|e| SubmitError::MalformedResponse(e.to_string()))?;

    if let Some(message) = parsed.error_message() {
        return Err(SubmitError::Rejected(message.to_string()));
    }

    match (parsed.matched.unwrap_or(false), parsed.matched_with) {
        (true, Some(with)) => Ok(SubmissionResult::Matched(MatchedParty {
            name: with.name,
            current_section: with.current_section,
        })),
        (true, None) => Err(SubmitError::MalformedResponse(
            "matched without matchedWith".to_string(),
        )),
        (false, _) => Ok(SubmissionResult::Pending),
    }
}

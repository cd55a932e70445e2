//! Trait abstraction for the matching service to enable mocking in tests

use super::SubmitError;
use crate::state::{SubmissionResult, SwapRequest};
use async_trait::async_trait;

/// Operations the wizard needs from the matching service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SwapApi: Send + Sync {
    /// Send one swap request and classify the answer
    async fn submit_swap_request(
        &self,
        request: &SwapRequest,
    ) -> Result<SubmissionResult, SubmitError>;

    /// Whether the service answers its health endpoint
    async fn check_health(&self) -> bool;
}

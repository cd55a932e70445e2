//! Submission failures and the message shown for each

use thiserror::Error;

/// Shown on a 429 without an `error` field
pub const DEFAULT_RATE_LIMIT_MESSAGE: &str = "Too many requests. Please wait 15 minutes.";

/// Shown for anything that is not a server-provided message
pub const FALLBACK_MESSAGE: &str = "Error submitting request. Please try again.";

#[derive(Debug, Error)]
pub enum SubmitError {
    /// HTTP 429 from the matching service
    #[error("rate limited: {}", .message.as_deref().unwrap_or(DEFAULT_RATE_LIMIT_MESSAGE))]
    RateLimited { message: Option<String> },

    /// The service answered with an explicit `error` field
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("could not reach matching service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The background task ended without reporting
    #[error("submission ended without a response")]
    Interrupted,
}

impl SubmitError {
    /// The single line the wizard displays for this failure
    pub fn user_message(&self) -> String {
        match self {
            Self::RateLimited { message } => format!(
                "⏳ {}",
                message.as_deref().unwrap_or(DEFAULT_RATE_LIMIT_MESSAGE)
            ),
            Self::Rejected(message) => message.clone(),
            Self::Transport(_)
            | Self::MalformedResponse(_)
            | Self::Interrupted => FALLBACK_MESSAGE.to_string(),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

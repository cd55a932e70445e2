//! Response bodies returned by the matching service

use serde::Deserialize;

/// Body of a `/swap-request` answer. Every field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub matched: Option<bool>,
    #[serde(default)]
    pub matched_with: Option<MatchedWith>,
}

impl SwapResponse {
    /// The `error` text, ignoring empty strings
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedWith {
    pub name: String,
    pub current_section: String,
}

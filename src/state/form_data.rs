//! Swap request data collected by the wizard

use serde::{Deserialize, Serialize};

/// Academic year a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearLevel {
    #[serde(rename = "1st Year")]
    FirstYear,
    #[serde(rename = "2nd Year")]
    SecondYear,
    #[serde(rename = "3rd Year")]
    ThirdYear,
}

impl YearLevel {
    /// Options in the order they are offered
    pub const ALL: [YearLevel; 3] = [Self::FirstYear, Self::SecondYear, Self::ThirdYear];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstYear => "1st Year",
            Self::SecondYear => "2nd Year",
            Self::ThirdYear => "3rd Year",
        }
    }

    /// Position in [`YearLevel::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Self::FirstYear => 0,
            Self::SecondYear => 1,
            Self::ThirdYear => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Fields accumulated across steps 1 to 3
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pub name: String,
    pub email: String,
    pub year_level: Option<YearLevel>,
    pub current_section: String,
    pub desired_section: String,
}

/// A complete request, as sent to the matching service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub name: String,
    pub email: String,
    pub year_level: YearLevel,
    pub current_section: String,
    pub desired_section: String,
}

impl SwapRequest {
    /// Snapshot the form. Returns `None` until a year level is chosen.
    pub fn from_form(form: &FormData) -> Option<Self> {
        Some(Self {
            name: form.name.clone(),
            email: form.email.clone(),
            year_level: form.year_level?,
            current_section: form.current_section.clone(),
            desired_section: form.desired_section.clone(),
        })
    }
}

/// The student on the other side of a match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedParty {
    pub name: String,
    pub current_section: String,
}

/// Successful answer from the matching service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Matched(MatchedParty),
    /// Recorded server-side, no partner yet
    Pending,
}

impl SubmissionResult {
    pub fn matched_party(&self) -> Option<&MatchedParty> {
        match self {
            Self::Matched(party) => Some(party),
            Self::Pending => None,
        }
    }
}

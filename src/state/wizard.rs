//! The four-step wizard state machine

use super::form_data::{FormData, SubmissionResult, SwapRequest, YearLevel};
use super::validation::{identity_ready, is_non_blank, sections_ready};
use crate::api::SubmitError;
use chrono::{DateTime, Local};

/// Focus within step 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityFocus {
    #[default]
    Name,
    Email,
    Next,
}

impl IdentityFocus {
    pub fn next(&self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Next,
            Self::Next => Self::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Name => Self::Next,
            Self::Email => Self::Name,
            Self::Next => Self::Email,
        }
    }
}

/// Highlighted option in step 2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearChoice {
    Year(YearLevel),
    Back,
}

impl Default for YearChoice {
    fn default() -> Self {
        Self::Year(YearLevel::FirstYear)
    }
}

impl YearChoice {
    pub fn next(&self) -> Self {
        match self {
            Self::Year(year) => YearLevel::from_index(year.index() + 1)
                .map(Self::Year)
                .unwrap_or(Self::Back),
            Self::Back => Self::Year(YearLevel::FirstYear),
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Year(YearLevel::FirstYear) => Self::Back,
            Self::Year(year) => YearLevel::from_index(year.index() - 1)
                .map(Self::Year)
                .unwrap_or(Self::Back),
            Self::Back => Self::Year(YearLevel::ThirdYear),
        }
    }
}

/// Focus within step 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionsFocus {
    #[default]
    CurrentSection,
    DesiredSection,
    FindMatch,
    Back,
}

impl SectionsFocus {
    pub fn next(&self) -> Self {
        match self {
            Self::CurrentSection => Self::DesiredSection,
            Self::DesiredSection => Self::FindMatch,
            Self::FindMatch => Self::Back,
            Self::Back => Self::CurrentSection,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::CurrentSection => Self::Back,
            Self::DesiredSection => Self::CurrentSection,
            Self::FindMatch => Self::DesiredSection,
            Self::Back => Self::FindMatch,
        }
    }
}

/// What step 4 displays
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedSubmission {
    /// Exactly what was sent
    pub request: SwapRequest,
    pub result: SubmissionResult,
    pub answered_at: DateTime<Local>,
}

/// Current wizard step with the data only that step needs
#[derive(Debug, Clone, PartialEq)]
pub enum WizardStep {
    /// Step 1: name and email
    Identity { focus: IdentityFocus },
    /// Step 2: year level
    Year { highlighted: YearChoice },
    /// Step 3: current and desired section, submission
    Sections { focus: SectionsFocus },
    /// Step 4: matching service answer
    Outcome(CompletedSubmission),
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::Identity {
            focus: IdentityFocus::default(),
        }
    }
}

impl WizardStep {
    /// 1-based step number
    pub fn number(&self) -> u8 {
        match self {
            Self::Identity { .. } => 1,
            Self::Year { .. } => 2,
            Self::Sections { .. } => 3,
            Self::Outcome(_) => 4,
        }
    }

    pub const COUNT: u8 = 4;
}

/// The whole session state: step, fields, loading flag, error message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardState {
    pub step: WizardStep,
    pub form: FormData,
    /// A submission is in flight
    pub loading: bool,
    pub error: Option<String>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the step 1 "Next" action is currently allowed
    pub fn can_advance(&self) -> bool {
        identity_ready(&self.form.name, &self.form.email)
    }

    /// The text field under focus, if the focus is on a text field
    fn focused_field_mut(&mut self) -> Option<&mut String> {
        match self.step {
            WizardStep::Identity {
                focus: IdentityFocus::Name,
            } => Some(&mut self.form.name),
            WizardStep::Identity {
                focus: IdentityFocus::Email,
            } => Some(&mut self.form.email),
            WizardStep::Sections {
                focus: SectionsFocus::CurrentSection,
            } => Some(&mut self.form.current_section),
            WizardStep::Sections {
                focus: SectionsFocus::DesiredSection,
            } => Some(&mut self.form.desired_section),
            _ => None,
        }
    }

    /// True when typing would edit a field
    pub fn is_editing_text(&self) -> bool {
        matches!(
            self.step,
            WizardStep::Identity {
                focus: IdentityFocus::Name | IdentityFocus::Email
            } | WizardStep::Sections {
                focus: SectionsFocus::CurrentSection | SectionsFocus::DesiredSection
            }
        )
    }

    /// Append a character to the focused field
    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.focused_field_mut() {
            field.push(c);
        }
    }

    /// Remove the last character from the focused field
    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.pop();
        }
    }

    pub fn focus_next(&mut self) {
        match &mut self.step {
            WizardStep::Identity { focus } => *focus = focus.next(),
            WizardStep::Year { highlighted } => *highlighted = highlighted.next(),
            WizardStep::Sections { focus } => *focus = focus.next(),
            WizardStep::Outcome(_) => {}
        }
    }

    pub fn focus_prev(&mut self) {
        match &mut self.step {
            WizardStep::Identity { focus } => *focus = focus.prev(),
            WizardStep::Year { highlighted } => *highlighted = highlighted.prev(),
            WizardStep::Sections { focus } => *focus = focus.prev(),
            WizardStep::Outcome(_) => {}
        }
    }

    /// Step 1 to step 2. Returns false when the identity guard fails.
    pub fn advance(&mut self) -> bool {
        if !matches!(self.step, WizardStep::Identity { .. }) || !self.can_advance() {
            return false;
        }
        let highlighted = self
            .form
            .year_level
            .map(YearChoice::Year)
            .unwrap_or_default();
        self.step = WizardStep::Year { highlighted };
        tracing::debug!("wizard advanced to year level");
        true
    }

    /// Step 2 to step 3, recording the chosen year
    pub fn pick_year(&mut self, year: YearLevel) -> bool {
        if !matches!(self.step, WizardStep::Year { .. }) {
            return false;
        }
        self.form.year_level = Some(year);
        self.step = WizardStep::Sections {
            focus: SectionsFocus::default(),
        };
        tracing::debug!(year = year.label(), "wizard advanced to sections");
        true
    }

    /// One step back from 2 or 3. Refused while a submission is in flight.
    pub fn back(&mut self) -> bool {
        match self.step {
            WizardStep::Year { .. } => {
                self.step = WizardStep::Identity {
                    focus: IdentityFocus::default(),
                };
                true
            }
            WizardStep::Sections { .. } if !self.loading => {
                let highlighted = self
                    .form
                    .year_level
                    .map(YearChoice::Year)
                    .unwrap_or_default();
                self.step = WizardStep::Year { highlighted };
                true
            }
            _ => false,
        }
    }

    /// Start a submission from step 3.
    ///
    /// On success the loading flag is set, the error is cleared and the
    /// request to send is returned. A blank section moves focus to it instead.
    pub fn begin_submission(&mut self) -> Option<SwapRequest> {
        if self.loading {
            return None;
        }
        let WizardStep::Sections { focus } = &mut self.step else {
            return None;
        };
        if !sections_ready(&self.form.current_section, &self.form.desired_section) {
            *focus = if is_non_blank(&self.form.current_section) {
                SectionsFocus::DesiredSection
            } else {
                SectionsFocus::CurrentSection
            };
            return None;
        }
        let Some(request) = SwapRequest::from_form(&self.form) else {
            tracing::warn!("sections step reached without a year level");
            return None;
        };
        self.loading = true;
        self.error = None;
        Some(request)
    }

    /// Apply the answer for a submission started by [`Self::begin_submission`]
    pub fn finish_submission(
        &mut self,
        request: SwapRequest,
        outcome: Result<SubmissionResult, SubmitError>,
    ) {
        self.loading = false;
        if !matches!(self.step, WizardStep::Sections { .. }) {
            tracing::warn!(step = self.step.number(), "submission answer arrived off step 3");
            return;
        }
        match outcome {
            Ok(result) => {
                self.error = None;
                self.step = WizardStep::Outcome(CompletedSubmission {
                    request,
                    result,
                    answered_at: Local::now(),
                });
            }
            Err(err) => {
                self.error = Some(err.user_message());
            }
        }
    }

    /// Back to the initial state, whatever came before
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Application state and core logic

use crate::api::{SubmitError, SwapApi};
use crate::state::{
    IdentityFocus, SectionsFocus, SplashState, SubmissionResult, SwapRequest, WizardState,
    WizardStep, YearChoice, YearLevel,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use tokio::sync::oneshot::{self, error::TryRecvError};

type SubmissionOutcome = Result<SubmissionResult, SubmitError>;

/// A request sent to the matching service that has not answered yet
struct PendingSubmission {
    request: SwapRequest,
    receiver: oneshot::Receiver<SubmissionOutcome>,
}

/// Main application struct
pub struct App {
    /// Wizard step, fields, loading flag and error message
    pub wizard: WizardState,
    /// Matching service client
    api: Arc<dyn SwapApi>,
    /// Whether the app should quit
    quit: bool,
    /// One-line feedback shown in the status bar
    pub status_message: Option<String>,
    /// Loading screen state, present until it finishes
    pub splash_state: Option<SplashState>,
    health_probe: Option<oneshot::Receiver<bool>>,
    submission: Option<PendingSubmission>,
}

impl App {
    /// Create a new App talking to `api`, starting at step 1
    pub fn new(api: Arc<dyn SwapApi>) -> Self {
        Self {
            wizard: WizardState::new(),
            api,
            quit: false,
            status_message: None,
            splash_state: None,
            health_probe: None,
            submission: None,
        }
    }

    /// Show the loading screen and probe the service in the background
    pub fn start_health_probe(&mut self) {
        let (tx, rx) = oneshot::channel();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            let healthy = api.check_health().await;
            let _ = tx.send(healthy);
        });
        self.health_probe = Some(rx);
        self.splash_state = Some(SplashState::new());
    }

    /// Update loading screen animation state.
    /// Returns true once the screen has finished.
    pub fn update_splash(&mut self, terminal_height: u16) -> bool {
        if let Some(ref mut splash) = self.splash_state {
            splash.update(terminal_height);
            if splash.is_complete() {
                self.splash_state = None;
                return true;
            }
        }
        false
    }

    pub fn in_splash(&self) -> bool {
        self.splash_state.is_some()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether a background task is still running
    pub fn is_busy(&self) -> bool {
        self.submission.is_some() || self.health_probe.is_some()
    }

    /// Apply results of finished background tasks
    pub fn poll_background(&mut self) {
        let probe = match self.health_probe.as_mut().map(|rx| rx.try_recv()) {
            None | Some(Err(TryRecvError::Empty)) => None,
            Some(Ok(healthy)) => Some(healthy),
            Some(Err(TryRecvError::Closed)) => Some(false),
        };
        if let Some(healthy) = probe {
            self.health_probe = None;
            self.apply_health(healthy);
        }

        let answer = match self.submission.as_mut().map(|p| p.receiver.try_recv()) {
            None | Some(Err(TryRecvError::Empty)) => None,
            Some(Ok(outcome)) => Some(outcome),
            Some(Err(TryRecvError::Closed)) => Some(Err(SubmitError::Interrupted)),
        };
        if let Some(outcome) = answer {
            if let Some(pending) = self.submission.take() {
                self.apply_submission(pending.request, outcome);
            }
        }
    }

    fn apply_health(&mut self, healthy: bool) {
        if let Some(ref mut splash) = self.splash_state {
            splash.probe_finished();
        }
        if healthy {
            tracing::info!("matching service is up");
        } else {
            tracing::warn!("matching service health probe failed");
            self.status_message =
                Some("Matching service is not responding; requests may fail".to_string());
        }
    }

    fn apply_submission(&mut self, request: SwapRequest, outcome: SubmissionOutcome) {
        match &outcome {
            Ok(SubmissionResult::Matched(party)) => {
                tracing::info!(partner = %party.name, section = %party.current_section, "match found");
            }
            Ok(SubmissionResult::Pending) => {
                tracing::info!("swap request recorded, no match yet");
            }
            Err(SubmitError::Rejected(message)) => {
                tracing::warn!("swap request rejected: {message}");
            }
            Err(e) if e.is_rate_limited() => tracing::warn!("{e}"),
            Err(e) => tracing::error!("swap request failed: {e}"),
        }
        self.wizard.finish_submission(request, outcome);
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Global quit
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        // Any key skips the loading screen
        if self.splash_state.take().is_some() {
            return;
        }

        match self.wizard.step {
            WizardStep::Identity { .. } => self.handle_identity_key(key),
            WizardStep::Year { .. } => self.handle_year_key(key),
            WizardStep::Sections { .. } => self.handle_sections_key(key),
            WizardStep::Outcome(_) => self.handle_outcome_key(key),
        }
    }

    /// Plain characters only; Ctrl/Alt chords are not text
    fn typed_char(key: &KeyEvent) -> Option<char> {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(c)
            }
            _ => None,
        }
    }

    /// Handle keys in step 1
    fn handle_identity_key(&mut self, key: KeyEvent) {
        let WizardStep::Identity { focus } = self.wizard.step else {
            return;
        };
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.wizard.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.wizard.focus_prev(),
            KeyCode::Enter => match focus {
                IdentityFocus::Name => self.wizard.focus_next(),
                IdentityFocus::Email | IdentityFocus::Next => self.try_advance(),
            },
            KeyCode::Backspace => self.wizard.backspace(),
            _ => {
                if let Some(c) = Self::typed_char(&key) {
                    self.status_message = None;
                    self.wizard.input_char(c);
                }
            }
        }
    }

    fn try_advance(&mut self) {
        if self.wizard.advance() {
            self.status_message = None;
        } else {
            self.status_message =
                Some("Enter your name and an email address containing @".to_string());
        }
    }

    /// Handle keys in step 2
    fn handle_year_key(&mut self, key: KeyEvent) {
        let WizardStep::Year { highlighted } = self.wizard.step else {
            return;
        };
        match key.code {
            KeyCode::Up | KeyCode::Left | KeyCode::BackTab | KeyCode::Char('k') => {
                self.wizard.focus_prev()
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Tab | KeyCode::Char('j') => {
                self.wizard.focus_next()
            }
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                if let Some(year) = YearLevel::from_index(index) {
                    self.wizard.pick_year(year);
                }
            }
            KeyCode::Enter => match highlighted {
                YearChoice::Year(year) => {
                    self.wizard.pick_year(year);
                }
                YearChoice::Back => {
                    self.wizard.back();
                }
            },
            KeyCode::Esc | KeyCode::Backspace => {
                self.wizard.back();
            }
            _ => {}
        }
    }

    /// Handle keys in step 3
    fn handle_sections_key(&mut self, key: KeyEvent) {
        let WizardStep::Sections { focus } = self.wizard.step else {
            return;
        };
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.wizard.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.wizard.focus_prev(),
            KeyCode::Enter => match focus {
                SectionsFocus::CurrentSection => self.wizard.focus_next(),
                SectionsFocus::DesiredSection | SectionsFocus::FindMatch => {
                    self.start_submission()
                }
                SectionsFocus::Back => {
                    self.wizard.back();
                }
            },
            KeyCode::Esc => {
                self.wizard.back();
            }
            KeyCode::Backspace => self.wizard.backspace(),
            _ => {
                if let Some(c) = Self::typed_char(&key) {
                    self.wizard.input_char(c);
                }
            }
        }
    }

    /// Handle keys in step 4
    fn handle_outcome_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.wizard.reset();
                self.status_message = None;
            }
            KeyCode::Char('c') => self.copy_match(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// Send the form to the matching service on a background task
    fn start_submission(&mut self) {
        if self.submission.is_some() {
            return;
        }
        let Some(request) = self.wizard.begin_submission() else {
            return;
        };
        tracing::info!(
            year = request.year_level.label(),
            current = %request.current_section,
            desired = %request.desired_section,
            "submitting swap request"
        );

        let (tx, rx) = oneshot::channel();
        let api = Arc::clone(&self.api);
        let payload = request.clone();
        tokio::spawn(async move {
            let outcome = api.submit_swap_request(&payload).await;
            let _ = tx.send(outcome);
        });
        self.submission = Some(PendingSubmission {
            request,
            receiver: rx,
        });
    }

    /// Copy the matched partner's details to the clipboard
    fn copy_match(&mut self) {
        let WizardStep::Outcome(ref done) = self.wizard.step else {
            return;
        };
        let Some(party) = done.result.matched_party() else {
            return;
        };
        let text = format!("{} (section {})", party.name, party.current_section);
        self.status_message = Some(match self.copy_to_clipboard(&text) {
            Ok(()) => "Copied match details".to_string(),
            Err(e) => {
                tracing::warn!("clipboard unavailable: {e}");
                "Could not copy to clipboard".to_string()
            }
        });
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }

    /// Wait for the in-flight submission and apply it
    #[cfg(test)]
    pub async fn settle_submission(&mut self) {
        if let Some(pending) = self.submission.take() {
            let outcome = pending
                .receiver
                .await
                .unwrap_or(Err(SubmitError::Interrupted));
            self.apply_submission(pending.request, outcome);
        }
    }

    /// Wait for the health probe and apply it
    #[cfg(test)]
    pub async fn settle_health_probe(&mut self) {
        if let Some(rx) = self.health_probe.take() {
            let healthy = rx.await.unwrap_or(false);
            self.apply_health(healthy);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::MockSwapApi;
    use crate::state::{MatchedParty, SplashPhase};

    pub(crate) fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub(crate) fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    pub(crate) fn app_with(mock: MockSwapApi) -> App {
        App::new(Arc::new(mock))
    }

    /// Drive the keyboard through Scenario input up to step 3 with sections filled
    pub(crate) fn fill_to_sections(app: &mut App) {
        type_text(app, "Alex Lee");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "alex@x.edu");
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('2')));
        type_text(app, "1");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "2");
    }

    pub(crate) fn mock_answering(outcome: fn() -> SubmissionOutcome) -> MockSwapApi {
        let mut mock = MockSwapApi::new();
        mock.expect_submit_swap_request()
            .times(1)
            .returning(move |_| outcome());
        mock
    }

    pub(crate) fn sam_cruz() -> SubmissionOutcome {
        Ok(SubmissionResult::Matched(MatchedParty {
            name: "Sam Cruz".to_string(),
            current_section: "2".to_string(),
        }))
    }

    mod keys {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_ctrl_c_quits() {
            let mut app = app_with(MockSwapApi::new());
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
            assert!(app.should_quit());
        }

        #[test]
        fn test_release_events_are_ignored() {
            let mut app = app_with(MockSwapApi::new());
            let mut release = key(KeyCode::Char('x'));
            release.kind = KeyEventKind::Release;
            app.handle_key(release);
            assert!(app.wizard.form.name.is_empty());
        }

        #[test]
        fn test_typing_fills_name_then_email() {
            let mut app = app_with(MockSwapApi::new());
            type_text(&mut app, "Alex");
            app.handle_key(key(KeyCode::Enter));
            type_text(&mut app, "a@b");
            assert_eq!(app.wizard.form.name, "Alex");
            assert_eq!(app.wizard.form.email, "a@b");
        }

        #[test]
        fn test_shifted_letters_are_text() {
            let mut app = app_with(MockSwapApi::new());
            app.handle_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
            assert_eq!(app.wizard.form.name, "A");
        }

        #[test]
        fn test_invalid_identity_keeps_step_and_hints() {
            let mut app = app_with(MockSwapApi::new());
            type_text(&mut app, "Alex");
            app.handle_key(key(KeyCode::Tab));
            type_text(&mut app, "alex.x.edu");
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.wizard.step.number(), 1);
            assert!(app.status_message.is_some());
        }

        #[test]
        fn test_year_picked_by_highlight() {
            let mut app = app_with(MockSwapApi::new());
            type_text(&mut app, "Alex");
            app.handle_key(key(KeyCode::Tab));
            type_text(&mut app, "a@b");
            app.handle_key(key(KeyCode::Enter));
            app.handle_key(key(KeyCode::Down));
            app.handle_key(key(KeyCode::Down));
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.wizard.step.number(), 3);
            assert_eq!(app.wizard.form.year_level, Some(YearLevel::ThirdYear));
        }

        #[test]
        fn test_year_step_back_option() {
            let mut app = app_with(MockSwapApi::new());
            type_text(&mut app, "Alex");
            app.handle_key(key(KeyCode::Tab));
            type_text(&mut app, "a@b");
            app.handle_key(key(KeyCode::Enter));
            app.handle_key(key(KeyCode::Up)); // wraps to Back
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.wizard.step.number(), 1);
        }

        #[test]
        fn test_esc_from_sections_goes_back() {
            let mut app = app_with(MockSwapApi::new());
            fill_to_sections(&mut app);
            app.handle_key(key(KeyCode::Esc));
            assert_eq!(app.wizard.step.number(), 2);
        }

        #[test]
        fn test_enter_with_blank_section_sends_nothing() {
            // No expectation: a call would panic
            let mut app = app_with(MockSwapApi::new());
            fill_to_sections(&mut app);
            app.handle_key(key(KeyCode::Backspace));
            app.handle_key(key(KeyCode::Enter));
            assert!(!app.wizard.loading);
            assert!(!app.is_busy());
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_scenario_match_found() {
            let mut mock = MockSwapApi::new();
            mock.expect_submit_swap_request()
                .withf(|req| {
                    req.name == "Alex Lee"
                        && req.email == "alex@x.edu"
                        && req.year_level == YearLevel::SecondYear
                        && req.current_section == "1"
                        && req.desired_section == "2"
                })
                .times(1)
                .returning(|_| sam_cruz());
            let mut app = app_with(mock);
            fill_to_sections(&mut app);
            app.handle_key(key(KeyCode::Enter));
            assert!(app.wizard.loading);

            app.settle_submission().await;

            assert!(!app.wizard.loading);
            assert!(app.wizard.error.is_none());
            let WizardStep::Outcome(ref done) = app.wizard.step else {
                panic!("expected step 4");
            };
            let party = done.result.matched_party().unwrap();
            assert_eq!(party.name, "Sam Cruz");
            assert_eq!(party.current_section, "2");
            assert_eq!(done.request.current_section, "1");
        }

        #[tokio::test]
        async fn test_scenario_pending() {
            let mut app = app_with(mock_answering(|| Ok(SubmissionResult::Pending)));
            fill_to_sections(&mut app);
            app.handle_key(key(KeyCode::Enter));
            app.settle_submission().await;
            let WizardStep::Outcome(ref done) = app.wizard.step else {
                panic!("expected step 4");
            };
            assert_eq!(done.result, SubmissionResult::Pending);
            assert_eq!(done.request.desired_section, "2");
        }

        #[tokio::test]
        async fn test_scenario_rate_limited() {
            let mut app = app_with(mock_answering(|| {
                Err(SubmitError::RateLimited {
                    message: Some("Slow down".to_string()),
                })
            }));
            fill_to_sections(&mut app);
            app.handle_key(key(KeyCode::Enter));
            app.settle_submission().await;
            assert_eq!(app.wizard.step.number(), 3);
            assert!(!app.wizard.loading);
            assert_eq!(app.wizard.error.as_deref(), Some("⏳ Slow down"));
        }

        #[tokio::test]
        async fn test_scenario_transport_failure() {
            let mut app = app_with(mock_answering(|| {
                Err(SubmitError::MalformedResponse("eof".to_string()))
            }));
            fill_to_sections(&mut app);
            app.handle_key(key(KeyCode::Enter));
            app.settle_submission().await;
            assert_eq!(app.wizard.step.number(), 3);
            assert_eq!(
                app.wizard.error.as_deref(),
                Some("Error submitting request. Please try again.")
            );
        }

        #[tokio::test]
        async fn test_in_flight_blocks_resubmit_and_back() {
            let mut app = app_with(mock_answering(|| Ok(SubmissionResult::Pending)));
            fill_to_sections(&mut app);
            app.handle_key(key(KeyCode::Enter));
            app.handle_key(key(KeyCode::Enter));
            app.handle_key(key(KeyCode::Esc));
            assert_eq!(app.wizard.step.number(), 3);
            assert!(app.wizard.loading);
            app.settle_submission().await;
            assert_eq!(app.wizard.step.number(), 4);
        }

        #[tokio::test]
        async fn test_poll_background_applies_answer() {
            let mut app = app_with(mock_answering(|| Ok(SubmissionResult::Pending)));
            fill_to_sections(&mut app);
            app.handle_key(key(KeyCode::Enter));
            for _ in 0..10 {
                tokio::task::yield_now().await;
                app.poll_background();
                if !app.wizard.loading {
                    break;
                }
            }
            assert_eq!(app.wizard.step.number(), 4);
        }

        #[tokio::test]
        async fn test_enter_on_result_resets() {
            let mut app = app_with(mock_answering(sam_cruz));
            fill_to_sections(&mut app);
            app.handle_key(key(KeyCode::Enter));
            app.settle_submission().await;
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.wizard, WizardState::default());
        }

        #[tokio::test]
        async fn test_retry_after_error_clears_message() {
            let mut mock = MockSwapApi::new();
            let mut seq = mockall::Sequence::new();
            mock.expect_submit_swap_request()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Err(SubmitError::Rejected("Invalid section".to_string())));
            mock.expect_submit_swap_request()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(SubmissionResult::Pending));
            let mut app = app_with(mock);
            fill_to_sections(&mut app);
            app.handle_key(key(KeyCode::Enter));
            app.settle_submission().await;
            assert_eq!(app.wizard.error.as_deref(), Some("Invalid section"));

            app.handle_key(key(KeyCode::Enter));
            assert!(app.wizard.error.is_none());
            app.settle_submission().await;
            assert_eq!(app.wizard.step.number(), 4);
        }
    }

    mod splash {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_probe_failure_is_tolerated() {
            let mut mock = MockSwapApi::new();
            mock.expect_check_health().times(1).returning(|| false);
            let mut app = app_with(mock);
            app.start_health_probe();
            assert!(app.in_splash());

            app.settle_health_probe().await;

            assert!(app.status_message.is_some());
            let splash = app.splash_state.as_ref().unwrap();
            assert!(!splash.is_waiting_for_probe());
        }

        #[tokio::test]
        async fn test_probe_success_sets_no_warning() {
            let mut mock = MockSwapApi::new();
            mock.expect_check_health().times(1).returning(|| true);
            let mut app = app_with(mock);
            app.start_health_probe();
            app.settle_health_probe().await;
            assert!(app.status_message.is_none());
        }

        #[tokio::test]
        async fn test_any_key_skips_loading_screen() {
            let mut mock = MockSwapApi::new();
            mock.expect_check_health().returning(|| true);
            let mut app = app_with(mock);
            app.start_health_probe();
            app.handle_key(key(KeyCode::Char('x')));
            assert!(!app.in_splash());
            // The skipping key is not typed into the form
            assert!(app.wizard.form.name.is_empty());
        }

        #[tokio::test]
        async fn test_update_splash_holds_until_probe() {
            let mut mock = MockSwapApi::new();
            mock.expect_check_health().returning(|| true);
            let mut app = app_with(mock);
            app.start_health_probe();
            assert!(!app.update_splash(24));
            assert_eq!(
                app.splash_state.as_ref().map(|s| s.phase),
                Some(SplashPhase::Display)
            );
        }

        #[test]
        fn test_update_splash_without_state() {
            let mut app = app_with(MockSwapApi::new());
            assert!(!app.update_splash(24));
            assert!(!app.in_splash());
        }
    }
}

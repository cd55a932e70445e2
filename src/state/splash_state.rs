//! Start-up loading screen state
//!
//! The logo stays up while the matching service health probe runs, then
//! scrolls away.

use std::time::{Duration, Instant};

/// Animation phase for the loading screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashPhase {
    /// Logo held on screen
    Display,
    /// Logo animating upward
    ScrollUp,
    /// Animation finished
    Complete,
}

#[derive(Debug)]
pub struct SplashState {
    pub start_time: Instant,
    pub phase: SplashPhase,
    /// Current vertical offset (for scroll animation)
    pub scroll_offset: f32,
    /// When the health probe reported back
    probe_finished_at: Option<Instant>,
}

impl SplashState {
    /// Minimum time the logo is held
    const DISPLAY_DURATION: Duration = Duration::from_millis(900);
    const ANIMATION_DURATION: Duration = Duration::from_millis(600);

    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(start_time: Instant) -> Self {
        Self {
            start_time,
            phase: SplashPhase::Display,
            scroll_offset: 0.0,
            probe_finished_at: None,
        }
    }

    /// Record that the health probe finished, whatever its answer
    pub fn probe_finished(&mut self) {
        if self.probe_finished_at.is_none() {
            self.probe_finished_at = Some(Instant::now());
        }
    }

    pub fn is_waiting_for_probe(&self) -> bool {
        self.probe_finished_at.is_none()
    }

    pub fn update(&mut self, terminal_height: u16) {
        self.update_at(Instant::now(), terminal_height);
    }

    /// Advance the animation as of `now`
    fn update_at(&mut self, now: Instant, terminal_height: u16) {
        if self.phase == SplashPhase::Complete {
            return;
        }
        let Some(probe_done) = self.probe_finished_at else {
            self.phase = SplashPhase::Display;
            self.scroll_offset = 0.0;
            return;
        };

        // Scrolling starts once the logo was held long enough and the probe is done
        let scroll_start = (self.start_time + Self::DISPLAY_DURATION).max(probe_done);
        if now < scroll_start {
            self.phase = SplashPhase::Display;
            self.scroll_offset = 0.0;
        } else if now < scroll_start + Self::ANIMATION_DURATION {
            self.phase = SplashPhase::ScrollUp;
            let progress =
                (now - scroll_start).as_secs_f32() / Self::ANIMATION_DURATION.as_secs_f32();
            let eased = simple_easing::cubic_out(progress);
            self.scroll_offset = eased * (terminal_height as f32);
        } else {
            self.phase = SplashPhase::Complete;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SplashPhase::Complete
    }
}

impl Default for SplashState {
    fn default() -> Self {
        Self::new()
    }
}

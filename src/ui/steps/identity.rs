//! Step 1: name and email

use crate::state::{IdentityFocus, WizardState};
use crate::ui::components::{draw_field, render_button, BUTTON_HEIGHT, FIELD_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, wizard: &WizardState, focus: IdentityFocus) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Title
            Constraint::Length(FIELD_HEIGHT),  // Name
            Constraint::Length(FIELD_HEIGHT),  // Email
            Constraint::Length(1),             // Spacing
            Constraint::Length(BUTTON_HEIGHT), // Next
            Constraint::Min(0),
        ])
        .split(area);

    super::draw_title(frame, chunks[0], "Let's get started");

    draw_field(
        frame,
        chunks[1],
        "Full Name",
        &wizard.form.name,
        "Enter your full name",
        focus == IdentityFocus::Name,
    );
    draw_field(
        frame,
        chunks[2],
        "Email (for notifications)",
        &wizard.form.email,
        "you@student.cec.edu.ph",
        focus == IdentityFocus::Email,
    );
    render_button(
        frame,
        chunks[4],
        "Next →",
        focus == IdentityFocus::Next,
        wizard.can_advance(),
    );
}

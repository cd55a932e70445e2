//! Step 3: sections and submission

use crate::state::{SectionsFocus, WizardState};
use crate::ui::components::{
    draw_field, error_box_height, render_back_button, render_button, render_error_box,
    BUTTON_HEIGHT, FIELD_HEIGHT,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub const FIND_MATCH_LABEL: &str = "Find Match";
pub const FINDING_MATCH_LABEL: &str = "🔍 Finding Match...";

pub fn draw(frame: &mut Frame, area: Rect, wizard: &WizardState, focus: SectionsFocus) {
    let error_height = wizard
        .error
        .as_deref()
        .map(|message| error_box_height(message, area.width) + 1)
        .unwrap_or(1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Title
            Constraint::Length(FIELD_HEIGHT),  // Current section
            Constraint::Length(FIELD_HEIGHT),  // Desired section
            Constraint::Length(error_height),  // Error (or spacing)
            Constraint::Length(BUTTON_HEIGHT), // Find Match
            Constraint::Length(BUTTON_HEIGHT), // Back
            Constraint::Min(0),
        ])
        .split(area);

    super::draw_title(frame, chunks[0], "Section Details");

    draw_field(
        frame,
        chunks[1],
        "Your Current Section:",
        &wizard.form.current_section,
        "eg, 1",
        focus == SectionsFocus::CurrentSection,
    );
    draw_field(
        frame,
        chunks[2],
        "Section You Want:",
        &wizard.form.desired_section,
        "e.g., 2",
        focus == SectionsFocus::DesiredSection,
    );

    if let Some(message) = wizard.error.as_deref() {
        let box_area = Rect {
            y: chunks[3].y + 1,
            height: chunks[3].height.saturating_sub(1),
            ..chunks[3]
        };
        render_error_box(frame, box_area, message);
    }

    let submit_label = if wizard.loading {
        FINDING_MATCH_LABEL
    } else {
        FIND_MATCH_LABEL
    };
    render_button(
        frame,
        chunks[4],
        submit_label,
        focus == SectionsFocus::FindMatch,
        !wizard.loading,
    );
    render_back_button(
        frame,
        chunks[5],
        focus == SectionsFocus::Back,
        !wizard.loading,
    );
}

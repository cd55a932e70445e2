//! Step 2: year level buttons

use crate::state::{YearChoice, YearLevel};
use crate::ui::components::{render_back_button, render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, highlighted: YearChoice) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Title
            Constraint::Length(BUTTON_HEIGHT), // 1st Year
            Constraint::Length(BUTTON_HEIGHT), // 2nd Year
            Constraint::Length(BUTTON_HEIGHT), // 3rd Year
            Constraint::Length(1),             // Spacing
            Constraint::Length(BUTTON_HEIGHT), // Back
            Constraint::Min(0),
        ])
        .split(area);

    super::draw_title(frame, chunks[0], "What year level are you?");

    for year in YearLevel::ALL {
        let label = format!("{}  {}", year.index() + 1, year.label());
        render_button(
            frame,
            chunks[year.index() + 1],
            &label,
            highlighted == YearChoice::Year(year),
            true,
        );
    }

    render_back_button(frame, chunks[5], highlighted == YearChoice::Back, true);
}

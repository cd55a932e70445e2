//! One renderer per wizard step

mod identity;
mod outcome;
mod sections;
mod year_level;

use crate::state::{WizardState, WizardStep};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Draw the body of the current step
pub fn draw(frame: &mut Frame, area: Rect, wizard: &WizardState) {
    match &wizard.step {
        WizardStep::Identity { focus } => identity::draw(frame, area, wizard, *focus),
        WizardStep::Year { highlighted } => year_level::draw(frame, area, *highlighted),
        WizardStep::Sections { focus } => sections::draw(frame, area, wizard, *focus),
        WizardStep::Outcome(done) => outcome::draw(frame, area, done),
    }
}

/// Step heading
fn draw_title(frame: &mut Frame, area: Rect, title: &str) {
    let line = Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

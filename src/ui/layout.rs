//! Layout components (header, content column, status bar)

use crate::app::App;
use crate::state::{SubmissionResult, WizardStep};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Widest the form column gets
const CONTENT_WIDTH: u16 = 60;

/// Split the screen into header, body and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(0),    // Step content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], centered_column(chunks[1]), chunks[2])
}

/// Horizontally centered column of at most [`CONTENT_WIDTH`]
pub fn centered_column(area: Rect) -> Rect {
    let width = area.width.min(CONTENT_WIDTH);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

/// Title, subtitle and step progress
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let step = app.wizard.step.number();
    let progress: String = (1..=WizardStep::COUNT)
        .map(|n| if n <= step { '●' } else { '○' })
        .flat_map(|c| [c, ' '])
        .collect();

    let lines = vec![
        Line::from(Span::styled(
            "📚 Section Swap",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Trade class sections with fellow students",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled(progress.trim_end().to_string(), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("  Step {} of {}", step, WizardStep::COUNT),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Key hints for the current step
fn key_hints(app: &App) -> &'static str {
    match &app.wizard.step {
        WizardStep::Identity { .. } if app.wizard.is_editing_text() => {
            "Type to edit  Tab: next field  Enter: continue  Ctrl+C: quit"
        }
        WizardStep::Identity { .. } => "Shift+Tab: previous field  Enter: continue  Ctrl+C: quit",
        WizardStep::Year { .. } => "↑↓: choose  1-3: pick  Enter: select  Esc: back",
        WizardStep::Sections { .. } if app.wizard.loading => {
            "Waiting for the matching service..."
        }
        WizardStep::Sections { .. } if app.wizard.is_editing_text() => {
            "Type to edit  Tab: next field  Enter: find match  Esc: back"
        }
        WizardStep::Sections { .. } => "Shift+Tab: previous field  Enter: select  Esc: back",
        WizardStep::Outcome(done) => match done.result {
            SubmissionResult::Matched(_) => "Enter: new request  c: copy match  q: quit",
            SubmissionResult::Pending => "Enter: new request  q: quit",
        },
    }
}

/// Status bar: feedback message if any, key hints otherwise
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status_message {
        Some(message) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(Span::styled(
            format!(" {}", key_hints(app)),
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

//! Step 4: match result or pending acknowledgment

use crate::state::{CompletedSubmission, MatchedParty, SubmissionResult, SwapRequest};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Text shown while no partner has been found yet
pub fn pending_message(request: &SwapRequest) -> String {
    format!(
        "We'll notify you at {} when someone with section {} wants to swap to {}.",
        request.email, request.desired_section, request.current_section
    )
}

/// Lines of the matched partner card
pub fn match_card_lines(party: &MatchedParty, request: &SwapRequest) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            party.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Has section: {}", party.current_section)),
        Line::from(format!("Wants your section: {}", request.current_section)),
    ]
}

fn headline(icon: &'static str, title: &'static str, color: Color) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(icon),
        Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
}

fn answered_at(done: &CompletedSubmission) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        format!("Answered at {}", done.answered_at.format("%H:%M")),
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center)
}

pub fn draw(frame: &mut Frame, area: Rect, done: &CompletedSubmission) {
    match &done.result {
        SubmissionResult::Matched(party) => draw_matched(frame, area, done, party),
        SubmissionResult::Pending => draw_pending(frame, area, done),
    }
}

fn draw_matched(frame: &mut Frame, area: Rect, done: &CompletedSubmission, party: &MatchedParty) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Icon + title
            Constraint::Length(2),             // Intro
            Constraint::Length(5),             // Partner card
            Constraint::Length(2),             // Email note
            Constraint::Length(2),             // Timestamp
            Constraint::Length(BUTTON_HEIGHT), // Reset
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(headline("🎉", "Match Found!", Color::Green), chunks[0]);
    frame.render_widget(
        Paragraph::new("You've been matched with:").alignment(Alignment::Center),
        chunks[1],
    );

    let card = Paragraph::new(match_card_lines(party, &done.request))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
    frame.render_widget(card, chunks[2]);

    let note = Line::from(vec![
        Span::raw("We sent an email to "),
        Span::styled(
            done.request.email.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" with the details!"),
    ]);
    frame.render_widget(
        Paragraph::new(note)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[3],
    );
    frame.render_widget(answered_at(done), chunks[4]);
    render_button(frame, chunks[5], "Make Another Request", true, true);
}

fn draw_pending(frame: &mut Frame, area: Rect, done: &CompletedSubmission) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Icon + title
            Constraint::Length(4),             // Notify message
            Constraint::Length(3),             // Info
            Constraint::Length(2),             // Timestamp
            Constraint::Length(BUTTON_HEIGHT), // Reset
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(headline("⏳", "Request Submitted!", Color::Yellow), chunks[0]);
    frame.render_widget(
        Paragraph::new(pending_message(&done.request))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new("You can close this page. We'll email you when a match is found.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[2],
    );
    frame.render_widget(answered_at(done), chunks[3]);
    render_button(frame, chunks[4], "Make Another Request", true, true);
}

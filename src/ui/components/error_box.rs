//! Inline error message box

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows needed to show `message` at `width`, borders included
pub fn error_box_height(message: &str, width: u16) -> u16 {
    let inner = width.saturating_sub(4).max(1) as usize;
    let lines = wrap_text(message, inner).len() as u16;
    lines + 2
}

/// Render the message in a red bordered box
pub fn render_error_box(frame: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(format!(" {message}"))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(paragraph, area);
}

/// Wrap text to fit within a maximum width
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let current_width = current_line.chars().count();
            if current_width + word.chars().count() + 1 > max_width && !current_line.is_empty() {
                lines.push(current_line);
                current_line = String::new();
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        lines.push(current_line);
    }

    lines
}

//! UI module for rendering the TUI

mod components;
mod layout;
mod splash;
mod steps;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if let Some(ref splash_state) = app.splash_state {
        splash::draw(frame, area, splash_state);
        return;
    }

    let (header_area, body_area, status_area) = layout::create_layout(area);
    layout::draw_header(frame, header_area, app);
    steps::draw(frame, body_area, &app.wizard);
    layout::draw_status_bar(frame, status_area, app);
}

//! Reusable UI components

mod button;
mod error_box;
mod field;

pub use button::{render_back_button, render_button, BUTTON_HEIGHT};
pub use error_box::{error_box_height, render_error_box};
pub use field::{draw_field, FIELD_HEIGHT};

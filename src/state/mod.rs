//! Application state module

mod form_data;
mod splash_state;
pub mod validation;
mod wizard;

pub use form_data::*;
pub use splash_state::*;
pub use wizard::*;

//! Matching service client module

mod client;
mod error;
mod traits;
mod types;

pub use client::{SwapClient, DEFAULT_API_URL};
pub use error::SubmitError;
pub use traits::SwapApi;

#[cfg(test)]
pub use traits::MockSwapApi;

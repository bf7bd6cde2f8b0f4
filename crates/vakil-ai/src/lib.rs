//! Generation layer: per-category instruction templates and the HTTP
//! client for the draft-generation service.

mod client;
mod template;

pub use client::{DraftClient, DraftEngine, GenerateError};
pub use template::build_prompt;

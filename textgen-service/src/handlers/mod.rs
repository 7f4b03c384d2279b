//! HTTP handlers for the text generation service.

pub mod health;
pub mod metrics;
pub mod text;

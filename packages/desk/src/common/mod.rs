// Common utilities shared across the application

pub mod sanitize;

pub use sanitize::{sanitize_opt, sanitize_text};

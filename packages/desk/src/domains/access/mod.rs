//! Access domain - the gate decision procedure and its event log
//!
//! Flow: operator input → validator → gate → store (read, then write) →
//! notifier (on denial) → display.

pub mod errors;
pub mod gate;
pub mod models;
pub mod validator;

// Re-export commonly used types
pub use errors::AccessError;
pub use gate::{AccessGate, AccessGranted};
pub use models::access_event::{AccessEvent, AccessLogEntry, Direction};
pub use validator::{validate_code, CodeError};

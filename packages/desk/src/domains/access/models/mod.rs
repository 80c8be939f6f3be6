pub mod access_event;

pub use access_event::{AccessEvent, AccessLogEntry, Direction};

//! Member domain - registration, payment status, and lookup by barcode

pub mod actions;
pub mod data;
pub mod models;

// Re-export commonly used types
pub use data::MemberData;
pub use models::member::{Member, NewMember, PaymentStatus};

pub mod register;

pub use register::{deactivate_member, register_member, set_payment_status, RegisterMember};

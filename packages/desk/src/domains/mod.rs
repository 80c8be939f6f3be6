pub mod access;
pub mod member;
pub mod reporting;
pub mod settings;

//! Settings domain - key/value configuration rows (admin phone, SMS toggle)

pub mod models;

pub use models::setting::Setting;

// Gym Desk - Access Control Core
//
// This crate provides the front-desk access-control core: barcode validation,
// the entry/exit gate decision procedure, member persistence, and daily
// reporting. The `desk` binary wires it to Postgres and a terminal loop.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;

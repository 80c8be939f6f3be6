//! Reporting - day statistics and CSV rendering over store query results
//!
//! Pure functions: the store queries feed in, strings come out. Writing the
//! CSV to disk is the caller's job.

pub mod daily;

pub use daily::{daily_report_csv, daily_stats, member_report_csv, DailyStats};

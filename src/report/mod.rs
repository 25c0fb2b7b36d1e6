//! Reporting utilities: run summaries and curve tables.

pub mod format;

pub use format::*;

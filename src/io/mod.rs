//! Input/output helpers.
//!
//! - two-row curve CSV ingest + validation (`ingest`)
//! - atomic envelope CSV export (`export`)
//! - envelope JSON read/write (`curve`)

pub mod curve;
pub mod export;
pub mod ingest;

pub use curve::*;
pub use export::*;
pub use ingest::*;

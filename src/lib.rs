//! `interaction-envelope` library crate.
//!
//! Combines two sampled interaction curves (e.g. normal force vs. moment
//! resistance for two load orientations) into one conservative envelope.
//!
//! The binary (`envelope`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the combination can be embedded in a larger batch pipeline

pub mod app;
pub mod cli;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
pub mod telemetry;

//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - curves and the boundary/extremum tags used to filter them (`Curve`, `BoundaryRule`, `Extremum`)
//! - combination outputs (`ReferenceOrdinates`, `CombinedEnvelope`)
//! - run configuration and file locations (`CombineConfig`, `CurvePaths`)
//! - a serde adapter so NaN/infinite values survive a JSON round trip (`non_finite`)

pub mod non_finite;
pub mod types;

pub use types::*;

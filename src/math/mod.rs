//! Mathematical utilities: piecewise-linear interpolation.

pub mod interp;

pub use interp::*;

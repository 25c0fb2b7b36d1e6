//! Error types.
//!
//! - `CurveError` is what the combination library returns.
//! - `AppError` is what the binary reports: a message plus a process exit code.

use thiserror::Error;

use crate::domain::CurveLabel;

/// Failures of the curve-combination pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// Input does not consist of two equal-length numeric rows.
    #[error("malformed curve '{source_name}': {reason}")]
    MalformedCurve { source_name: String, reason: String },

    /// A filtered curve has fewer than two points, so it cannot be interpolated.
    #[error("curve {curve} has {points} point(s) after boundary filtering; at least 2 are required")]
    InsufficientSamples { curve: CurveLabel, points: usize },

    /// The raw-bound overlap test selected no ordinates.
    #[error(
        "curves do not overlap: range_min={range_min} is below range_max={range_max}, no reference ordinates remain"
    )]
    EmptyOverlap { range_min: f64, range_max: f64 },

    /// Monotonic validation is enabled and the y-sequence changes direction (or repeats).
    #[error("curve {curve} is not strictly monotonic in y at index {index}")]
    NonMonotonic { curve: CurveLabel, index: usize },
}

impl CurveError {
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedCurve {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Exit code used when this error terminates the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            CurveError::MalformedCurve { .. } => 2,
            CurveError::InsufficientSamples { .. }
            | CurveError::EmptyOverlap { .. }
            | CurveError::NonMonotonic { .. } => 3,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// IO failure on a specific path (exit code 2).
    pub fn io(action: &str, path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::new(2, format!("Failed to {action} '{}': {err}", path.display()))
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Prefix the message with the selector / path it belongs to.
    pub fn context(self, what: impl std::fmt::Display) -> Self {
        Self {
            exit_code: self.exit_code,
            message: format!("{what}: {}", self.message),
        }
    }
}

impl From<CurveError> for AppError {
    fn from(err: CurveError) -> Self {
        Self::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

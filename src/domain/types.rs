//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - used in-memory during the combination
//! - exported to CSV/JSON
//! - reloaded later for inspection

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::non_finite;
use crate::error::CurveError;

/// Which of the two input curves a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveLabel {
    A,
    B,
}

impl std::fmt::Display for CurveLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            CurveLabel::A => "A",
            CurveLabel::B => "B",
        })
    }
}

/// A sampled relation between two physical quantities (e.g. N vs. M).
///
/// `x` and `y` always have the same length. The order of the samples is the
/// order in which the upstream model traversed its domain; interpolation
/// assumes that traversal is monotonic in `y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    #[serde(with = "non_finite::vec")]
    x: Vec<f64>,
    #[serde(with = "non_finite::vec")]
    y: Vec<f64>,
}

impl Curve {
    /// Build a curve from parallel x/y sequences.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, CurveError> {
        if x.len() != y.len() {
            return Err(CurveError::malformed(
                "<memory>",
                format!("x has {} values but y has {}", x.len(), y.len()),
            ));
        }
        Ok(Self { x, y })
    }

    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (x, y) = points.into_iter().unzip();
        Self { x, y }
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// First sampled y (in traversal order).
    pub fn first_y(&self) -> Option<f64> {
        self.y.first().copied()
    }

    /// Last sampled y (in traversal order).
    pub fn last_y(&self) -> Option<f64> {
        self.y.last().copied()
    }

    /// Direction of the y-sequence, if it is strictly monotonic.
    pub fn y_direction(&self) -> Monotonicity {
        if self.y.len() < 2 {
            return Monotonicity::Trivial;
        }
        if self.y.windows(2).all(|w| w[1] > w[0]) {
            Monotonicity::Increasing
        } else if self.y.windows(2).all(|w| w[1] < w[0]) {
            Monotonicity::Decreasing
        } else {
            Monotonicity::Mixed
        }
    }
}

/// Shape of a curve's y-sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Monotonicity {
    /// Fewer than two samples.
    Trivial,
    Increasing,
    Decreasing,
    /// Changes direction or repeats a value.
    Mixed,
}

impl Monotonicity {
    pub fn display_name(self) -> &'static str {
        match self {
            Monotonicity::Trivial => "trivial",
            Monotonicity::Increasing => "strictly increasing",
            Monotonicity::Decreasing => "strictly decreasing",
            Monotonicity::Mixed => "not monotonic",
        }
    }
}

/// Which extreme of y to keep when collapsing boundary points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extremum {
    Minimum,
    Maximum,
}

/// Boundary points on the x = 0 axis, split by the sign of y.
///
/// A piecewise structural model may emit several samples at x = 0. Only the
/// one closest to y = 0 bounds each half of the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryRule {
    /// `x == 0 && y > 0`, keep the minimal y.
    Upper,
    /// `x == 0 && y < 0`, keep the maximal y.
    Lower,
}

impl BoundaryRule {
    /// Order in which the rules are applied to every curve.
    pub const ALL: [BoundaryRule; 2] = [BoundaryRule::Upper, BoundaryRule::Lower];

    pub fn matches(self, x: f64, y: f64) -> bool {
        match self {
            BoundaryRule::Upper => x == 0.0 && y > 0.0,
            BoundaryRule::Lower => x == 0.0 && y < 0.0,
        }
    }

    pub fn extremum(self) -> Extremum {
        match self {
            BoundaryRule::Upper => Extremum::Minimum,
            BoundaryRule::Lower => Extremum::Maximum,
        }
    }
}

/// Merged, range-restricted evaluation ordinates.
///
/// Values are strictly descending and duplicate-free. The raw bounds used for
/// the range test are kept for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceOrdinates {
    #[serde(with = "non_finite")]
    pub range_min: f64,
    #[serde(with = "non_finite")]
    pub range_max: f64,
    #[serde(with = "non_finite::vec")]
    pub values: Vec<f64>,
}

impl ReferenceOrdinates {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One point of the combined envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopePoint {
    #[serde(with = "non_finite")]
    pub x: f64,
    #[serde(with = "non_finite")]
    pub y: f64,
    /// Curve whose interpolated x was kept.
    pub governing: CurveLabel,
    /// Interpolated values; NaN or infinite when a curve has repeated y knots.
    #[serde(with = "non_finite")]
    pub x_a: f64,
    #[serde(with = "non_finite")]
    pub x_b: f64,
}

/// The combined (most conservative) curve.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CombinedEnvelope {
    pub points: Vec<EnvelopePoint>,
}

impl CombinedEnvelope {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    pub fn governed_by(&self, label: CurveLabel) -> usize {
        self.points.iter().filter(|p| p.governing == label).count()
    }
}

/// Knobs of the combination itself (independent of where files live).
#[derive(Debug, Clone, Copy, Default)]
pub struct CombineOptions {
    /// Reject filtered curves whose y-sequence is not strictly monotonic.
    pub validate_monotonic: bool,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone)]
pub struct CombineConfig {
    pub dir: PathBuf,
    pub prefix: String,
    pub selectors: Vec<i64>,
    pub options: CombineOptions,
    /// Write an empty artifact instead of failing when the curves do not overlap.
    pub allow_empty_overlap: bool,
    pub export_json: bool,
    pub print_summary: bool,
}

/// Input and output locations for one selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurvePaths {
    pub selector: i64,
    pub curve_a: PathBuf,
    pub curve_b: PathBuf,
    pub output: PathBuf,
    pub json: PathBuf,
}

impl CurvePaths {
    /// `<dir>/<prefix>-<n>-1.csv`, `<dir>/<prefix>-<n>-2.csv` -> `<dir>/<prefix>-<n>.csv`.
    pub fn for_selector(dir: &Path, prefix: &str, selector: i64) -> Self {
        let stem = format!("{prefix}-{selector}");
        Self {
            selector,
            curve_a: dir.join(format!("{stem}-1.csv")),
            curve_b: dir.join(format!("{stem}-2.csv")),
            output: dir.join(format!("{stem}.csv")),
            json: dir.join(format!("{stem}.json")),
        }
    }
}

/// A saved envelope file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub selector: i64,
    pub curve_a_path: String,
    pub curve_b_path: String,
    pub output_path: String,
    pub filtered_a: Curve,
    pub filtered_b: Curve,
    pub ordinates: ReferenceOrdinates,
    pub envelope: CombinedEnvelope,
}

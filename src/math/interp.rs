//! Piecewise-linear interpolation with linear extrapolation.
//!
//! The combination evaluates each curve as a function `y -> x`, i.e. with the
//! curve's y-sequence as the independent axis. Curves arrive in traversal
//! order, which may be increasing or decreasing in y, so the samples are
//! ordered by y once up front.
//!
//! Evaluation:
//!
//! ```text
//! i  = first index with knots[i] >= t, clamped to [1, n-1]
//! x  = x[i-1] + (t - y[i-1]) * (x[i] - x[i-1]) / (y[i] - y[i-1])
//! ```
//!
//! Clamping the segment index means targets outside the sampled range continue
//! along the first/last segment. Nothing is clamped on the value side and
//! non-finite results (repeated knots) are passed through unchanged.

use crate::domain::{Curve, CurveLabel};
use crate::error::CurveError;

/// Linear `y -> x` interpolator for one curve.
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    knots: Vec<f64>,
    values: Vec<f64>,
}

impl LinearInterpolator {
    /// Build from a curve, using its y-sequence as the knots.
    ///
    /// Fails with `InsufficientSamples` for fewer than two points.
    pub fn from_curve(curve: &Curve, label: CurveLabel) -> Result<Self, CurveError> {
        if curve.len() < 2 {
            return Err(CurveError::InsufficientSamples {
                curve: label,
                points: curve.len(),
            });
        }

        let mut pairs: Vec<(f64, f64)> = curve.y().iter().copied().zip(curve.x().iter().copied()).collect();
        // Stable: samples sharing a y keep traversal order.
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (knots, values) = pairs.into_iter().unzip();
        Ok(Self { knots, values })
    }

    /// Evaluate at `t`, extrapolating beyond the sampled range.
    pub fn eval(&self, t: f64) -> f64 {
        let n = self.knots.len();
        let hi = self.knots.partition_point(|&k| k < t).clamp(1, n - 1);
        let lo = hi - 1;

        let (y0, y1) = (self.knots[lo], self.knots[hi]);
        let (x0, x1) = (self.values[lo], self.values[hi]);
        let slope = (x1 - x0) / (y1 - y0);
        slope * (t - y0) + x0
    }
}

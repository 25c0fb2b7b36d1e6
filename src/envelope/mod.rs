//! Envelope combination.
//!
//! Responsibilities:
//!
//! - collapse redundant x = 0 boundary points (`boundary`)
//! - build the shared reference ordinates (`ordinates`)
//! - interpolate both curves and keep the governing x (`select`)
//!
//! Preconditions on the inputs (the upstream model's job): both curves are
//! non-empty and traverse their domain monotonically in y, typically from the
//! largest y to the smallest. Monotonicity can be checked with
//! `CombineOptions::validate_monotonic`.

pub mod boundary;
pub mod ordinates;
pub mod select;

pub use boundary::*;
pub use ordinates::*;
pub use select::*;

use tracing::debug;

use crate::domain::{CombineOptions, CombinedEnvelope, Curve, CurveLabel, Monotonicity, ReferenceOrdinates};
use crate::error::CurveError;
use crate::math::LinearInterpolator;

/// Every intermediate of one combination.
#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    pub filtered_a: Curve,
    pub filtered_b: Curve,
    pub ordinates: ReferenceOrdinates,
    pub envelope: CombinedEnvelope,
}

impl Combination {
    /// Turn an empty ordinate set into `EmptyOverlap`.
    pub fn require_overlap(self) -> Result<Self, CurveError> {
        if self.ordinates.is_empty() {
            return Err(CurveError::EmptyOverlap {
                range_min: self.ordinates.range_min,
                range_max: self.ordinates.range_max,
            });
        }
        Ok(self)
    }
}

/// Combine two curves into their conservative envelope.
///
/// Fails with `EmptyOverlap` when no reference ordinate survives the range test.
pub fn combine_curves(a: &Curve, b: &Curve, options: &CombineOptions) -> Result<Combination, CurveError> {
    evaluate(a, b, options)?.require_overlap()
}

/// Run all stages; an empty overlap yields an empty envelope rather than an error.
pub fn evaluate(a: &Curve, b: &Curve, options: &CombineOptions) -> Result<Combination, CurveError> {
    let filtered_a = filter_boundaries(a);
    let filtered_b = filter_boundaries(b);
    debug!(
        a_before = a.len(),
        a_after = filtered_a.len(),
        b_before = b.len(),
        b_after = filtered_b.len(),
        "boundary filter applied"
    );

    if options.validate_monotonic {
        ensure_monotonic(&filtered_a, CurveLabel::A)?;
        ensure_monotonic(&filtered_b, CurveLabel::B)?;
    }

    let interp_a = LinearInterpolator::from_curve(&filtered_a, CurveLabel::A)?;
    let interp_b = LinearInterpolator::from_curve(&filtered_b, CurveLabel::B)?;

    let ordinates = build_reference_ordinates(&filtered_a, &filtered_b);
    debug!(
        range_min = ordinates.range_min,
        range_max = ordinates.range_max,
        count = ordinates.len(),
        "reference ordinates built"
    );

    let envelope = select_envelope(&ordinates.values, &interp_a, &interp_b);

    Ok(Combination {
        filtered_a,
        filtered_b,
        ordinates,
        envelope,
    })
}

/// Fail with `NonMonotonic` at the first index that breaks the curve's direction.
pub fn ensure_monotonic(curve: &Curve, label: CurveLabel) -> Result<(), CurveError> {
    match curve.y_direction() {
        Monotonicity::Increasing | Monotonicity::Decreasing | Monotonicity::Trivial => Ok(()),
        Monotonicity::Mixed => {
            let y = curve.y();
            let rising = y[1] > y[0];
            let index = y
                .windows(2)
                .position(|w| if rising { w[1] <= w[0] } else { w[1] >= w[0] })
                .map_or(1, |i| i + 1);
            Err(CurveError::NonMonotonic { curve: label, index })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_one() -> (Curve, Curve) {
        (
            Curve::from_points([(0.0, 10.0), (1.0, 5.0), (2.0, 0.0)]),
            Curve::from_points([(0.0, 10.0), (1.5, 4.0), (3.0, 0.0)]),
        )
    }

    #[test]
    fn scenario_one_envelope() {
        let (a, b) = scenario_one();
        let out = combine_curves(&a, &b, &CombineOptions::default()).unwrap();

        assert_eq!(out.filtered_a, a);
        assert_eq!(out.filtered_b, b);
        assert_eq!(out.envelope.ys(), vec![10.0, 5.0, 4.0, 0.0]);

        let xs = out.envelope.xs();
        assert!((xs[1] - 1.0).abs() < 1e-12);
        assert!((xs[2] - 1.2).abs() < 1e-12);
        assert_eq!(xs[3], 2.0);
    }

    #[test]
    fn scenario_two_empty_overlap() {
        let a = Curve::from_points([(0.0, 10.0), (1.0, 5.0)]);
        let b = Curve::from_points([(0.0, 4.0), (1.0, 0.0)]);

        let err = combine_curves(&a, &b, &CombineOptions::default()).unwrap_err();
        assert_eq!(
            err,
            CurveError::EmptyOverlap {
                range_min: 4.0,
                range_max: 5.0
            }
        );

        let out = evaluate(&a, &b, &CombineOptions::default()).unwrap();
        assert!(out.envelope.is_empty());
    }

    #[test]
    fn rerun_is_bit_identical() {
        let a = Curve::from_points([(0.0, 9.3), (0.7, 6.1), (1.9, 2.2), (2.4, -1.7)]);
        let b = Curve::from_points([(0.0, 8.8), (1.1, 5.0), (1.3, 0.4), (0.9, -2.5)]);
        let first = combine_curves(&a, &b, &CombineOptions::default()).unwrap();
        let second = combine_curves(&a, &b, &CombineOptions::default()).unwrap();
        let bits = |c: &Combination| c.envelope.xs().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&first), bits(&second));
        assert_eq!(first, second);
    }

    #[test]
    fn envelope_is_pointwise_minimum() {
        let a = Curve::from_points([(0.0, 9.3), (0.7, 6.1), (1.9, 2.2), (2.4, -1.7)]);
        let b = Curve::from_points([(0.0, 8.8), (1.1, 5.0), (1.3, 0.4), (0.9, -2.5)]);
        let out = combine_curves(&a, &b, &CombineOptions::default()).unwrap();
        let fa = LinearInterpolator::from_curve(&a, CurveLabel::A).unwrap();
        let fb = LinearInterpolator::from_curve(&b, CurveLabel::B).unwrap();

        assert_eq!(out.envelope.ys(), out.ordinates.values);
        for p in &out.envelope.points {
            assert_eq!(p.x, fa.eval(p.y).min(fb.eval(p.y)));
        }
    }

    #[test]
    fn boundary_duplicates_are_removed_before_interpolation() {
        let a = Curve::from_points([(0.0, 12.0), (0.0, 10.0), (1.0, 5.0), (2.0, 0.0)]);
        let b = Curve::from_points([(0.0, 10.0), (1.5, 4.0), (3.0, 0.0)]);
        let out = combine_curves(&a, &b, &CombineOptions::default()).unwrap();
        assert_eq!(out.filtered_a.len(), 3);
        assert_eq!(out.envelope.ys(), vec![10.0, 5.0, 4.0, 0.0]);
    }

    #[test]
    fn collapsed_curve_is_insufficient() {
        let a = Curve::from_points([(0.0, 3.0), (0.0, 2.0)]);
        let b = Curve::from_points([(0.0, 10.0), (1.5, 4.0), (3.0, 0.0)]);
        let err = combine_curves(&a, &b, &CombineOptions::default()).unwrap_err();
        assert_eq!(
            err,
            CurveError::InsufficientSamples {
                curve: CurveLabel::A,
                points: 1
            }
        );
    }

    #[test]
    fn monotonic_validation_is_opt_in() {
        let a = Curve::from_points([(0.0, 10.0), (1.0, 5.0), (1.5, 6.0), (2.0, 0.0)]);
        let b = Curve::from_points([(0.0, 10.0), (1.5, 4.0), (3.0, 0.0)]);

        assert!(combine_curves(&a, &b, &CombineOptions::default()).is_ok());

        let strict = CombineOptions {
            validate_monotonic: true,
        };
        let err = combine_curves(&a, &b, &strict).unwrap_err();
        assert_eq!(
            err,
            CurveError::NonMonotonic {
                curve: CurveLabel::A,
                index: 2
            }
        );
    }
}

//! Reference ordinate construction.
//!
//! The bounds come from the first and last sample of each curve as loaded,
//! not from the global extremes. For a valid pair `range_min >= range_max`;
//! the membership test uses the raw bounds in that order, so a reversed pair
//! selects nothing.

use std::cmp::Ordering;

use crate::domain::{Curve, ReferenceOrdinates};

/// Raw overlap bounds `(range_min, range_max)`.
///
/// Returns `None` if either curve is empty.
pub fn overlap_bounds(a: &Curve, b: &Curve) -> Option<(f64, f64)> {
    let range_min = a.first_y()?.min(b.first_y()?);
    let range_max = a.last_y()?.max(b.last_y()?);
    Some((range_min, range_max))
}

/// Merge both y-sequences into descending, duplicate-free ordinates inside the
/// raw bounds.
pub fn build_reference_ordinates(a: &Curve, b: &Curve) -> ReferenceOrdinates {
    let Some((range_min, range_max)) = overlap_bounds(a, b) else {
        return ReferenceOrdinates {
            range_min: f64::NAN,
            range_max: f64::NAN,
            values: Vec::new(),
        };
    };

    // NaN fails the range test, so the remaining values are totally ordered.
    let mut values: Vec<f64> = a
        .y()
        .iter()
        .chain(b.y())
        .copied()
        .filter(|&v| range_min >= v && v >= range_max)
        .collect();
    // Stable: among equal values (0.0 and -0.0) the first one seen in A then B survives.
    values.sort_by(|p, q| q.partial_cmp(p).unwrap_or(Ordering::Equal));
    values.dedup();

    ReferenceOrdinates {
        range_min,
        range_max,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_and_restricts_to_overlap() {
        let a = Curve::from_points([(0.0, 10.0), (1.0, 5.0), (2.0, 0.0)]);
        let b = Curve::from_points([(0.0, 10.0), (1.5, 4.0), (3.0, 0.0)]);
        let ords = build_reference_ordinates(&a, &b);
        assert_eq!(ords.range_min, 10.0);
        assert_eq!(ords.range_max, 0.0);
        assert_eq!(ords.values, vec![10.0, 5.0, 4.0, 0.0]);
    }

    #[test]
    fn keeps_the_first_signed_zero_seen() {
        let a = Curve::from_points([(0.0, 10.0), (1.0, 5.0), (2.0, -0.0)]);
        let b = Curve::from_points([(0.0, 10.0), (1.5, 4.0), (3.0, 0.0)]);
        let ords = build_reference_ordinates(&a, &b);
        assert_eq!(ords.values, vec![10.0, 5.0, 4.0, 0.0]);
        assert!(ords.values[3].is_sign_negative());

        let ords = build_reference_ordinates(&b, &a);
        assert!(ords.values[3].is_sign_positive());
    }

    #[test]
    fn nan_samples_are_not_ordinates() {
        let a = Curve::from_points([(0.0, 10.0), (1.0, f64::NAN), (2.0, 0.0)]);
        let b = Curve::from_points([(0.0, 10.0), (1.5, 4.0), (3.0, 0.0)]);
        let ords = build_reference_ordinates(&a, &b);
        assert_eq!(ords.values, vec![10.0, 4.0, 0.0]);
    }

    #[test]
    fn trims_values_outside_the_narrower_range() {
        let a = Curve::from_points([(0.0, 12.0), (1.0, 6.0), (2.0, -3.0)]);
        let b = Curve::from_points([(0.0, 9.0), (1.0, 2.0), (2.0, -1.0)]);
        let ords = build_reference_ordinates(&a, &b);
        assert_eq!((ords.range_min, ords.range_max), (9.0, -1.0));
        assert_eq!(ords.values, vec![9.0, 6.0, 2.0, -1.0]);
    }

    #[test]
    fn disjoint_ranges_yield_empty_set() {
        let a = Curve::from_points([(0.0, 10.0), (1.0, 5.0)]);
        let b = Curve::from_points([(0.0, 4.0), (1.0, 0.0)]);
        let ords = build_reference_ordinates(&a, &b);
        assert_eq!((ords.range_min, ords.range_max), (4.0, 5.0));
        assert!(ords.is_empty());
    }

    #[test]
    fn increasing_curves_are_not_normalized() {
        let a = Curve::from_points([(1.0, 0.0), (0.0, 10.0)]);
        let b = Curve::from_points([(1.0, 0.0), (0.0, 10.0)]);
        assert!(build_reference_ordinates(&a, &b).is_empty());
    }

    #[test]
    fn output_is_strictly_descending() {
        let a = Curve::from_points([(0.0, 8.0), (1.0, 3.0), (1.0, 3.0), (2.0, 0.0)]);
        let b = Curve::from_points([(0.0, 8.0), (1.0, 6.0), (1.0, 3.0), (2.0, 0.0)]);
        let ords = build_reference_ordinates(&a, &b);
        assert!(ords.values.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(ords.values, vec![8.0, 6.0, 3.0, 0.0]);
    }

    #[test]
    fn empty_curve_has_no_bounds() {
        let a = Curve::from_points(Vec::<(f64, f64)>::new());
        let b = Curve::from_points([(0.0, 1.0)]);
        assert_eq!(overlap_bounds(&a, &b), None);
        assert!(build_reference_ordinates(&a, &b).is_empty());
    }
}

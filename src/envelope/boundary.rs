//! Boundary-point filtering.
//!
//! A curve sampled from a piecewise structural model can contain several
//! points on the x = 0 axis with different y. For each half of the domain only
//! the extremal one is meaningful, so the others are dropped.

use crate::domain::{BoundaryRule, Curve, Extremum};

/// Index of the extremal y among `indices` (first occurrence wins on ties).
pub fn select_extremal(y: &[f64], indices: &[usize], extremum: Extremum) -> Option<usize> {
    let mut best: Option<usize> = None;
    for &i in indices {
        best = match best {
            None => Some(i),
            Some(b) => {
                let better = match extremum {
                    Extremum::Minimum => y[i] < y[b],
                    Extremum::Maximum => y[i] > y[b],
                };
                if better { Some(i) } else { Some(b) }
            }
        };
    }
    best
}

/// Collapse every point matching `predicate` into the single extremal one.
///
/// Kept points retain their original relative order; the surviving matching
/// point stays at its original position. With no match the curve is returned
/// unchanged.
pub fn filter_where<P>(curve: &Curve, predicate: P, extremum: Extremum) -> Curve
where
    P: Fn(f64, f64) -> bool,
{
    let matching: Vec<usize> = curve
        .points()
        .enumerate()
        .filter(|&(_, (x, y))| predicate(x, y))
        .map(|(i, _)| i)
        .collect();

    let Some(keep) = select_extremal(curve.y(), &matching, extremum) else {
        return curve.clone();
    };

    Curve::from_points(
        curve
            .points()
            .enumerate()
            .filter(|&(i, (x, y))| i == keep || !predicate(x, y))
            .map(|(_, p)| p),
    )
}

/// Apply one boundary rule.
pub fn filter_boundary(curve: &Curve, rule: BoundaryRule) -> Curve {
    filter_where(curve, |x, y| rule.matches(x, y), rule.extremum())
}

/// Apply the upper rule, then the lower rule to its output.
pub fn filter_boundaries(curve: &Curve) -> Curve {
    BoundaryRule::ALL
        .iter()
        .fold(curve.clone(), |acc, &rule| filter_boundary(&acc, rule))
}

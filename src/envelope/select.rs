//! Governing-value selection.

use crate::domain::{CombinedEnvelope, CurveLabel, EnvelopePoint};
use crate::math::LinearInterpolator;

/// Pick the more conservative (smaller) abscissa. Ties go to B.
pub fn governing(x_a: f64, x_b: f64) -> (f64, CurveLabel) {
    if x_a < x_b {
        (x_a, CurveLabel::A)
    } else {
        (x_b, CurveLabel::B)
    }
}

/// Evaluate both curves at every ordinate and keep the governing x.
///
/// The envelope's y-sequence is `ordinates` itself, in the same order.
pub fn select_envelope(ordinates: &[f64], a: &LinearInterpolator, b: &LinearInterpolator) -> CombinedEnvelope {
    let points = ordinates
        .iter()
        .map(|&y| {
            let x_a = a.eval(y);
            let x_b = b.eval(y);
            let (x, governing) = governing(x_a, x_b);
            EnvelopePoint {
                x,
                y,
                governing,
                x_a,
                x_b,
            }
        })
        .collect();
    CombinedEnvelope { points }
}

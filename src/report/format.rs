//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the combination code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::RunOutput;
use crate::domain::{CombinedEnvelope, Curve, CurveLabel};

/// Format the summary of one selector's combination.
pub fn format_run_summary(run: &RunOutput) -> String {
    let c = &run.combination;
    let mut out = String::new();

    out.push_str(&format!("=== envelope - selector {} ===\n", run.paths.selector));
    out.push_str(&format!(
        "Curve A: {} | points={} -> {} after boundary filter\n",
        run.paths.curve_a.display(),
        run.input_a.len(),
        c.filtered_a.len(),
    ));
    out.push_str(&format!(
        "Curve B: {} | points={} -> {} after boundary filter\n",
        run.paths.curve_b.display(),
        run.input_b.len(),
        c.filtered_b.len(),
    ));
    out.push_str(&format!(
        "Bounds: range_min={} range_max={}\n",
        fmt_num(c.ordinates.range_min),
        fmt_num(c.ordinates.range_max),
    ));
    out.push_str(&format!(
        "Reference ordinates (n={}): {}\n",
        c.ordinates.len(),
        fmt_vec(&c.ordinates.values),
    ));

    if c.envelope.is_empty() {
        out.push_str("\nNo overlap: envelope is empty.\n");
    } else {
        out.push('\n');
        out.push_str(&format_envelope_table(&c.envelope));
        out.push_str(&format!(
            "Governing: A={} B={}\n",
            c.envelope.governed_by(CurveLabel::A),
            c.envelope.governed_by(CurveLabel::B),
        ));
    }

    out.push_str(&format!("Written: {}\n", run.paths.output.display()));
    if run.wrote_json {
        out.push_str(&format!("Written: {}\n", run.paths.json.display()));
    }
    out
}

/// Envelope table: y, both per-curve x values, and the kept one.
pub fn format_envelope_table(envelope: &CombinedEnvelope) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>14} {:>14} {:>14} {:>14} {:>4}\n", "y", "x_a", "x_b", "x", "gov"));
    out.push_str(&format!("{:->14} {:->14} {:->14} {:->14} {:->4}\n", "", "", "", "", ""));
    for p in &envelope.points {
        out.push_str(&format!(
            "{:>14} {:>14} {:>14} {:>14} {:>4}\n",
            fmt_num(p.y),
            fmt_num(p.x_a),
            fmt_num(p.x_b),
            fmt_num(p.x),
            p.governing,
        ));
    }
    out
}

/// Format a loaded curve as a table (used by `envelope show`).
pub fn format_curve(curve: &Curve, source: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {source} ===\n"));
    out.push_str(&format!("Points: n={}\n", curve.len()));
    let (lo, hi) = curve
        .y()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if !curve.is_empty() {
        out.push_str(&format!("y-range: [{}, {}]\n", fmt_num(lo), fmt_num(hi)));
    }
    out.push_str(&format!("y-order: {}\n", curve.y_direction().display_name()));
    out.push('\n');

    out.push_str(&format!("{:>5} {:>14} {:>14}\n", "i", "x", "y"));
    out.push_str(&format!("{:->5} {:->14} {:->14}\n", "", "", ""));
    for (i, (x, y)) in curve.points().enumerate() {
        out.push_str(&format!("{i:>5} {:>14} {:>14}\n", fmt_num(x), fmt_num(y)));
    }
    out
}

fn fmt_num(v: f64) -> String {
    format!("{v:.4}")
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| fmt_num(*x)).collect();
    format!("[{}]", parts.join(", "))
}

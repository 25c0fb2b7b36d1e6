//! Shared "combine pipeline" logic.
//!
//! One selector is one independent combination:
//! load A + B -> boundary filter -> reference ordinates -> envelope -> write
//!
//! The CLI runs several selectors in parallel; nothing is shared between them
//! except the read-only config.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::domain::{CombineConfig, Curve, CurvePaths};
use crate::envelope::{Combination, evaluate};
use crate::error::AppError;
use crate::io::{envelope_file, read_curve_csv, stage_envelope_csv, stage_envelope_json};

/// All computed outputs of a single selector.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub paths: CurvePaths,
    pub input_a: Curve,
    pub input_b: Curve,
    pub combination: Combination,
    pub wrote_json: bool,
}

/// Combine the curve pair named by `selector`.
pub fn run_selector(config: &CombineConfig, selector: i64) -> Result<RunOutput, AppError> {
    let paths = CurvePaths::for_selector(&config.dir, &config.prefix, selector);
    run_paths(config, paths)
}

/// Combine an explicit pair of input files into `paths.output`.
///
/// Nothing is written unless every stage succeeded.
pub fn run_paths(config: &CombineConfig, paths: CurvePaths) -> Result<RunOutput, AppError> {
    // 1) Load both curves.
    let input_a = read_curve_csv(&paths.curve_a)?;
    let input_b = read_curve_csv(&paths.curve_b)?;

    // 2-4) Filter, build ordinates, select.
    let combination = evaluate(&input_a, &input_b, &config.options)?;
    let combination = if config.allow_empty_overlap {
        if combination.envelope.is_empty() {
            warn!(
                selector = paths.selector,
                range_min = combination.ordinates.range_min,
                range_max = combination.ordinates.range_max,
                "curves do not overlap; writing empty envelope"
            );
        }
        combination
    } else {
        combination.require_overlap()?
    };

    // 5) Stage every output, then replace the targets. The CSV goes last so a
    //    failed JSON export leaves the previous CSV in place.
    let staged_csv = stage_envelope_csv(&paths.output, &combination.envelope)?;
    let staged_json = if config.export_json {
        Some(stage_envelope_json(&paths.json, &envelope_file(&paths, &combination))?)
    } else {
        None
    };
    let wrote_json = staged_json.is_some();
    if let Some(json) = staged_json {
        json.commit()?;
    }
    staged_csv.commit()?;

    info!(
        selector = paths.selector,
        points = combination.envelope.len(),
        output = %paths.output.display(),
        "envelope written"
    );

    Ok(RunOutput {
        paths,
        input_a,
        input_b,
        combination,
        wrote_json,
    })
}

/// Run every configured selector. Results keep the selector order.
pub fn run_all(config: &CombineConfig) -> Vec<(i64, Result<RunOutput, AppError>)> {
    config
        .selectors
        .par_iter()
        .map(|&selector| {
            let result = run_selector(config, selector).map_err(|e| e.context(format!("selector {selector}")));
            (selector, result)
        })
        .collect()
}

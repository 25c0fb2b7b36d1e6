//! Read/write envelope JSON files.
//!
//! Envelope JSON is the "inspectable" representation of one combination:
//! - which files went in and where the CSV went out
//! - both curves after boundary filtering
//! - the reference ordinates with their raw bounds
//! - every envelope point with both per-curve values and the governing curve
//!
//! The schema is defined by `domain::EnvelopeFile`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::Utc;

use crate::domain::{CurvePaths, EnvelopeFile};
use crate::envelope::Combination;
use crate::error::AppError;
use crate::io::export::{StagedFile, stage_file};

/// Assemble the JSON document for one selector.
pub fn envelope_file(paths: &CurvePaths, combination: &Combination) -> EnvelopeFile {
    EnvelopeFile {
        tool: env!("CARGO_PKG_NAME").to_string(),
        generated_at: Utc::now(),
        selector: paths.selector,
        curve_a_path: paths.curve_a.display().to_string(),
        curve_b_path: paths.curve_b.display().to_string(),
        output_path: paths.output.display().to_string(),
        filtered_a: combination.filtered_a.clone(),
        filtered_b: combination.filtered_b.clone(),
        ordinates: combination.ordinates.clone(),
        envelope: combination.envelope.clone(),
    }
}

/// Stage an envelope JSON file next to `path` without replacing it yet.
pub fn stage_envelope_json(path: &Path, doc: &EnvelopeFile) -> Result<StagedFile, AppError> {
    stage_file(path, |out| {
        serde_json::to_writer_pretty(out, doc)
            .map_err(|e| AppError::new(2, format!("Failed to write envelope JSON: {e}")))
    })
}

/// Read an envelope JSON file.
pub fn read_envelope_json(path: &Path) -> Result<EnvelopeFile, AppError> {
    let file = File::open(path).map_err(|e| AppError::io("open envelope JSON", path, e))?;
    let doc: EnvelopeFile =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| AppError::new(2, format!("Invalid envelope JSON: {e}")))?;
    Ok(doc)
}

//! Curve CSV ingest.
//!
//! A curve file is two comma-delimited rows with no header:
//!
//! ```text
//! x0,x1,x2,...
//! y0,y1,y2,...
//! ```
//!
//! Design goals:
//! - **Strict parsing**: any non-numeric token rejects the whole curve
//! - **Clear errors**: row/column of the offending token in the message
//! - **No reordering**: samples keep the order the upstream model wrote them

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::domain::Curve;
use crate::error::{AppError, CurveError};

/// Load a curve from a two-row CSV file.
pub fn read_curve_csv(path: &Path) -> Result<Curve, AppError> {
    let file = File::open(path).map_err(|e| AppError::io("open curve CSV", path, e))?;
    let curve = parse_curve(file, &path.display().to_string())?;
    debug!(path = %path.display(), points = curve.len(), "curve loaded");
    Ok(curve)
}

/// Parse a curve from any reader. `source_name` is only used in error messages.
pub fn parse_curve<R: Read>(reader: R, source_name: &str) -> Result<Curve, CurveError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows: Vec<StringRecord> = Vec::with_capacity(2);
    for result in reader.records() {
        let record = result.map_err(|e| CurveError::malformed(source_name, format!("CSV parse error: {e}")))?;
        rows.push(record);
    }

    if rows.len() < 2 {
        return Err(CurveError::malformed(
            source_name,
            format!("expected 2 rows (x, y), found {}", rows.len()),
        ));
    }
    if rows.len() > 2 {
        warn!(source = source_name, rows = rows.len(), "ignoring rows after the second");
    }

    let x = parse_row(&rows[0], 0, source_name)?;
    let y = parse_row(&rows[1], 1, source_name)?;

    if x.len() != y.len() {
        return Err(CurveError::malformed(
            source_name,
            format!("row lengths differ: x has {} values, y has {}", x.len(), y.len()),
        ));
    }
    if x.is_empty() {
        return Err(CurveError::malformed(source_name, "curve has no samples"));
    }

    Curve::new(x, y)
}

fn parse_row(record: &StringRecord, row: usize, source_name: &str) -> Result<Vec<f64>, CurveError> {
    record
        .iter()
        .enumerate()
        .map(|(col, token)| {
            parse_token(token).ok_or_else(|| {
                CurveError::malformed(
                    source_name,
                    format!("non-numeric token '{token}' at row {row}, column {col}"),
                )
            })
        })
        .collect()
}

fn parse_token(token: &str) -> Option<f64> {
    // Spreadsheet exports sometimes prefix the first cell with a UTF-8 BOM.
    let token = token.trim().trim_start_matches('\u{feff}');
    if token.is_empty() {
        return None;
    }
    token.parse::<f64>().ok()
}

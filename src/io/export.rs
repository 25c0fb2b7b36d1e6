//! Write the combined envelope as a two-row CSV.
//!
//! Row 0 holds the x-values, row 1 the y-values, matching the input format so
//! the output can be fed back into the same tooling. An empty envelope is
//! written as two empty lines.
//!
//! Writes are atomic and happen in two steps: `stage_file` writes, flushes and
//! syncs a temporary file in the target directory, and `StagedFile::commit`
//! renames it over the target. Callers producing several files stage all of
//! them before committing any.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::CombinedEnvelope;
use crate::error::AppError;

/// Fully written temporary file waiting to replace `target`.
///
/// Dropping it without `commit` removes the temporary file and leaves the
/// target untouched.
#[derive(Debug)]
pub struct StagedFile {
    tmp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    /// Rename the temporary file over the target.
    pub fn commit(self) -> Result<(), AppError> {
        let target = self.target;
        self.tmp
            .persist(&target)
            .map_err(|e| AppError::io("replace", &target, e.error))?;
        Ok(())
    }
}

/// Write a temporary sibling of `path` through a buffered writer, then flush and sync it.
pub fn stage_file<F>(path: &Path, write: F) -> Result<StagedFile, AppError>
where
    F: FnOnce(&mut BufWriter<&File>) -> Result<(), AppError>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir).map_err(|e| AppError::io("create temporary file in", dir, e))?;

    {
        let mut out = BufWriter::new(tmp.as_file());
        write(&mut out)?;
        out.flush().map_err(|e| AppError::io("flush", path, e))?;
    }
    tmp.as_file().sync_all().map_err(|e| AppError::io("sync", path, e))?;

    Ok(StagedFile {
        tmp,
        target: path.to_path_buf(),
    })
}

/// Stage the envelope CSV for `path`.
pub fn stage_envelope_csv(path: &Path, envelope: &CombinedEnvelope) -> Result<StagedFile, AppError> {
    stage_file(path, |out| write_rows(out, path, &[envelope.xs(), envelope.ys()]))
}

fn write_rows<W: Write>(out: &mut W, path: &Path, rows: &[Vec<f64>]) -> Result<(), AppError> {
    let mut builder = csv::WriterBuilder::new();
    builder.flexible(true);
    let mut writer = builder.from_writer(out);
    for row in rows {
        if row.is_empty() {
            // csv would quote a lone empty field as `""`.
            writer.flush().map_err(|e| AppError::io("flush", path, e))?;
            let inner = writer
                .into_inner()
                .map_err(|e| AppError::io("flush", path, e.into_error()))?;
            inner
                .write_all(b"\n")
                .map_err(|e| AppError::io("write CSV row to", path, e))?;
            writer = builder.from_writer(inner);
        } else {
            writer
                .write_record(row.iter().map(|v| v.to_string()))
                .map_err(|e| AppError::io("write CSV row to", path, e))?;
        }
    }
    writer.flush().map_err(|e| AppError::io("flush", path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurveLabel, EnvelopePoint};
    use crate::io::parse_curve;

    fn write_envelope_csv(path: &Path, envelope: &CombinedEnvelope) -> Result<(), AppError> {
        stage_envelope_csv(path, envelope)?.commit()
    }

    fn envelope() -> CombinedEnvelope {
        let point = |x: f64, y: f64| EnvelopePoint {
            x,
            y,
            governing: CurveLabel::A,
            x_a: x,
            x_b: x + 1.0,
        };
        CombinedEnvelope {
            points: vec![point(0.0, 10.0), point(1.0, 5.0), point(1.2, 4.0)],
        }
    }

    #[test]
    fn writes_two_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_envelope_csv(&path, &envelope()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0,1,1.2\n10,5,4\n");
    }

    #[test]
    fn output_reads_back_as_a_curve() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_envelope_csv(&path, &envelope()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let curve = parse_curve(text.as_bytes(), "out.csv").unwrap();
        assert_eq!(curve.x(), &[0.0, 1.0, 1.2]);
        assert_eq!(curve.y(), &[10.0, 5.0, 4.0]);
    }

    #[test]
    fn overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale,stale,stale,stale\n1,2,3,4\n9,9,9,9\n").unwrap();

        write_envelope_csv(&path, &envelope()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "0,1,1.2\n10,5,4\n");
    }

    #[test]
    fn empty_envelope_writes_two_empty_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_envelope_csv(&path, &CombinedEnvelope::default()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "\n\n");
    }

    #[test]
    fn staged_file_is_invisible_until_committed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "old\n").unwrap();

        let staged = stage_envelope_csv(&path, &envelope()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\n");
        staged.commit().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0,1,1.2\n10,5,4\n");
    }

    #[test]
    fn dropped_stage_leaves_target_and_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "old\n").unwrap();

        drop(stage_envelope_csv(&path, &envelope()).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_write_callback_is_propagated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let err = stage_file(&path, |_| Err(AppError::new(2, "boom"))).unwrap_err();
        assert_eq!(err.message(), "boom");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_directory_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.csv");
        let err = write_envelope_csv(&path, &envelope()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(!path.exists());
    }
}

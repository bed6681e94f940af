//! Export a run to JSON and the interpolated curve to CSV.
//!
//! Both exports are meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::domain::CurveGrid;
use crate::error::AppError;

/// Write any serializable run output as pretty JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export JSON: {e}")))?;

    Ok(())
}

/// Write the interpolated grid as `tenor_years,spread_pct` rows.
pub fn write_curve_csv(path: &Path, grid: &CurveGrid) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve CSV '{}': {e}", path.display())))?;
    let mut file = BufWriter::new(file);

    writeln!(file, "tenor_years,spread_pct")
        .map_err(|e| AppError::new(2, format!("Failed to write curve CSV header: {e}")))?;

    for (t, s) in grid.points() {
        writeln!(file, "{t:.10},{s:.10}")
            .map_err(|e| AppError::new(2, format!("Failed to write curve CSV row: {e}")))?;
    }

    file.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush curve CSV: {e}")))?;
    Ok(())
}

//! Export per-point results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use serde::Serialize;

use crate::domain::{CurveType, Residual};
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct ExportRow {
    curve: CurveType,
    x: f64,
    y_obs: f64,
    y_fit: f64,
    residual: f64,
}

/// Write one row per input point: `curve,x,y_obs,y_fit,residual`.
pub fn write_results_csv(path: &Path, curve_type: CurveType, residuals: &[Residual]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for r in residuals {
        writer
            .serialize(ExportRow {
                curve: curve_type,
                x: r.point.x,
                y_obs: r.point.y,
                y_fit: r.y_fit,
                residual: r.residual,
            })
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV: {e}")))?;
    log::info!("wrote {} row(s) to {}", residuals.len(), path.display());

    Ok(())
}

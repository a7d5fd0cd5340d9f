//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a fitted curve:
//! - curve type + coefficients (constant first) + rendered equation
//! - fit diagnostics
//! - a precomputed fitted grid for quick plotting
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{Coefficients, CurveFile, CurveGrid, FitQuality, FitResult};
use crate::error::AppError;
use crate::models::{evaluate, format_equation};

/// Number of samples in the saved grid.
const GRID_POINTS: usize = 101;

/// Build the curve file for a fit over `[x_min, x_max]`.
pub fn curve_file(fit: &FitResult, quality: &FitQuality, x_min: f64, x_max: f64) -> CurveFile {
    CurveFile {
        tool: "curvefit".to_string(),
        generated_at: Utc::now(),
        curve_type: fit.curve_type,
        coefficients: fit.coefficients.clone(),
        equation: format_equation(&fit.coefficients, fit.curve_type),
        fit_quality: quality.clone(),
        grid: build_grid(&fit.coefficients, x_min, x_max, GRID_POINTS),
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, curve)
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;
    log::info!("wrote curve to {}", path.display());

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    if curve.grid.x.len() != curve.grid.y.len() {
        return Err(AppError::new(2, "Invalid curve JSON: grid x/y length mismatch."));
    }
    Ok(curve)
}

fn build_grid(coefficients: &Coefficients, x_min: f64, x_max: f64, n: usize) -> CurveGrid {
    let n = n.max(2);
    let mut x0 = x_min;
    let mut x1 = x_max;
    if !(x0.is_finite() && x1.is_finite()) || x1 < x0 {
        x0 = 0.0;
        x1 = 1.0;
    }
    if (x1 - x0).abs() < 1e-9 {
        x0 -= 0.5;
        x1 += 0.5;
    }

    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);

    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x0 + u * (x1 - x0);
        xs.push(x);
        ys.push(evaluate(coefficients.as_slice(), x));
    }

    CurveGrid { x: xs, y: ys }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurveType, PointSet};
    use crate::fit::fit;
    use crate::report::fit_quality;

    #[test]
    fn grid_spans_range_and_follows_polynomial() {
        let grid = build_grid(&Coefficients::new(vec![1.0, 0.0, 1.0]), -1.0, 3.0, 5);
        assert_eq!(grid.x, vec![-1.0, 0.0, 1.0, 2.0, 3.0]);
        assert_eq!(grid.y, vec![2.0, 1.0, 2.0, 5.0, 10.0]);
    }

    #[test]
    fn degenerate_range_is_widened() {
        let grid = build_grid(&Coefficients::new(vec![1.0, 1.0]), 2.0, 2.0, 3);
        assert_eq!(grid.x, vec![1.5, 2.0, 2.5]);
    }

    #[test]
    fn curve_json_round_trip() {
        let points = PointSet::starter();
        let fit = fit(&points, "cubic").unwrap();
        let quality = fit_quality(&points, &fit);
        let curve = curve_file(&fit, &quality, 1.0, 9.0);

        let path = std::env::temp_dir().join(format!("curvefit_{}_curve.json", std::process::id()));
        write_curve_json(&path, &curve).unwrap();
        let loaded = read_curve_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.tool, "curvefit");
        assert_eq!(loaded.curve_type, CurveType::Cubic);
        for (a, b) in loaded.coefficients.as_slice().iter().zip(fit.coefficients.as_slice()) {
            assert!((a - b).abs() <= 1e-12 * b.abs().max(1.0));
        }
        assert_eq!(loaded.equation, curve.equation);
        assert_eq!(loaded.grid.x.len(), GRID_POINTS);
        assert_eq!(loaded.grid.x[0], 1.0);
        assert_eq!(loaded.grid.x[GRID_POINTS - 1], 9.0);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let path = std::env::temp_dir().join(format!("curvefit_{}_bad.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let err = read_curve_json(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert_eq!(err.exit_code(), 2);
    }
}

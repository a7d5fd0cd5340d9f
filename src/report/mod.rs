//! Reporting utilities: residuals, fit quality, and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized

pub mod format;

pub use format::*;

use crate::domain::{FitQuality, FitResult, PointSet, Residual};

/// Pair every observed point with its fitted value.
pub fn compute_residuals(points: &PointSet, fit: &FitResult) -> Vec<Residual> {
    points
        .iter()
        .zip(fit.evaluated_curve.iter())
        .map(|(observed, fitted)| Residual {
            point: *observed,
            y_fit: fitted.y,
            residual: observed.y - fitted.y,
        })
        .collect()
}

/// SSE / RMSE / R² / BIC of a fit against the points it was fitted to.
pub fn fit_quality(points: &PointSet, fit: &FitResult) -> FitQuality {
    let residuals = compute_residuals(points, fit);
    let n = residuals.len();
    let sse: f64 = residuals.iter().map(|r| r.residual * r.residual).sum();

    let rmse = if n > 0 { (sse / n as f64).sqrt() } else { 0.0 };

    let y_bar = if n > 0 {
        residuals.iter().map(|r| r.point.y).sum::<f64>() / n as f64
    } else {
        0.0
    };
    let sst: f64 = residuals
        .iter()
        .map(|r| (r.point.y - y_bar) * (r.point.y - y_bar))
        .sum();
    let r_squared = (sst > 0.0).then(|| 1.0 - sse / sst);

    FitQuality {
        sse,
        rmse,
        r_squared,
        bic: bic(n, sse, fit.curve_type.coefficient_count()),
        n,
    }
}

/// `BIC = n ln(SSE/n) + k ln n`, with SSE/n floored so exact fits stay finite.
pub fn bic(n: usize, sse: f64, k: usize) -> f64 {
    if n == 0 {
        return f64::INFINITY;
    }
    let n_f = n as f64;
    let sse_per = (sse / n_f).max(1e-12);
    n_f * sse_per.ln() + (k as f64) * n_f.ln()
}

//! Shared "fit pipeline" logic used by the CLI commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> parse -> fit -> diagnostics
//!
//! The command handlers can then focus on presentation (printing, plots, exports).

use crate::domain::{CurveType, FitConfig, FitQuality, FitResult, PointSource, Residual};
use crate::error::{AppError, FitError};
use crate::fit::{FitSelection, compare_fits, fit};
use crate::io::ingest::{IngestedPoints, load_points};
use crate::report::{compute_residuals, fit_quality};

/// All computed outputs of a single `curvefit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedPoints,
    pub fit: FitResult,
    pub quality: FitQuality,
    pub residuals: Vec<Residual>,
}

/// Load points per the config and run the fit.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let ingest = load_points(&config.source)?;
    run_fit_with_points(config, ingest)
}

/// Run the fit on already-loaded points.
pub fn run_fit_with_points(config: &FitConfig, ingest: IngestedPoints) -> Result<RunOutput, AppError> {
    log::info!(
        "fitting {} point(s) from {} with curve type '{}'",
        ingest.points.len(),
        ingest.source_label,
        config.curve
    );

    let fit = fit(&ingest.points, &config.curve)?;
    let quality = fit_quality(&ingest.points, &fit);
    let residuals = compute_residuals(&ingest.points, &fit);

    Ok(RunOutput {
        ingest,
        fit,
        quality,
        residuals,
    })
}

/// Load points and compare the requested curve types.
pub fn run_compare(source: &PointSource, curves: &[String]) -> Result<(IngestedPoints, FitSelection), AppError> {
    let curve_types = curves
        .iter()
        .map(|c| c.parse::<CurveType>())
        .collect::<Result<Vec<_>, FitError>>()?;

    let ingest = load_points(source)?;
    let selection = compare_fits(&ingest.points, &curve_types)?;
    Ok((ingest, selection))
}

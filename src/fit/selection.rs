//! Degree comparison (linear vs quadratic vs cubic) using BIC.
//!
//! The tool fits each requested curve type and computes:
//! - SSE / RMSE / R²
//! - BIC = n * ln(SSE/n) + k * ln(n), k = degree + 1
//!
//! Selection rules:
//! 1. Curve types whose fit fails (too few distinct x, singular system) are skipped
//! 2. Choose the fit with minimum BIC
//! 3. If a simpler fit is within 2 BIC points of the minimum, pick the simpler fit

use rayon::prelude::*;

use crate::domain::{CurveType, FitQuality, FitResult, PointSet};
use crate::error::{FitError, Result};
use crate::fit::engine::fit_curve;
use crate::report::fit_quality;

/// BIC difference below which the simpler curve is preferred.
const BIC_TOLERANCE: f64 = 2.0;

/// A fit together with its diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredFit {
    pub fit: FitResult,
    pub quality: FitQuality,
}

/// Output of fitting + selection.
#[derive(Debug, Clone)]
pub struct FitSelection {
    pub best: ScoredFit,
    /// Successful fits, in the order requested.
    pub fits: Vec<ScoredFit>,
    /// Curve types that could not be fitted and why.
    pub skipped: Vec<(CurveType, String)>,
}

/// Fit every requested curve type (all of them when `curve_types` is empty) and
/// select the best one.
///
/// Fails with the first fit error if no curve type could be fitted.
pub fn compare_fits(points: &PointSet, curve_types: &[CurveType]) -> Result<FitSelection> {
    if points.is_empty() {
        return Err(FitError::EmptyInput);
    }
    let curve_types = if curve_types.is_empty() {
        &CurveType::ALL[..]
    } else {
        curve_types
    };

    let outcomes: Vec<(CurveType, Result<FitResult>)> = curve_types
        .par_iter()
        .map(|&curve_type| (curve_type, fit_curve(points, curve_type)))
        .collect();

    let mut fits = Vec::new();
    let mut skipped = Vec::new();
    let mut first_error = None;

    for (curve_type, outcome) in outcomes {
        match outcome {
            Ok(fit) => {
                let quality = fit_quality(points, &fit);
                fits.push(ScoredFit { fit, quality });
            }
            Err(err) => {
                log::info!("skipping {curve_type} fit: {err}");
                skipped.push((curve_type, err.to_string()));
                first_error.get_or_insert(err);
            }
        }
    }

    let Some(best) = select_by_bic(&fits) else {
        return Err(first_error.unwrap_or(FitError::EmptyInput));
    };

    Ok(FitSelection {
        best,
        fits,
        skipped,
    })
}

fn select_by_bic(fits: &[ScoredFit]) -> Option<ScoredFit> {
    let best_bic = fits
        .iter()
        .map(|f| f.quality.bic)
        .fold(f64::INFINITY, f64::min);

    // Walk curve types in order of increasing complexity and take the first
    // one that is close enough to the best.
    for curve_type in CurveType::ALL {
        if let Some(f) = fits.iter().find(|f| f.fit.curve_type == curve_type) {
            if f.quality.bic <= best_bic + BIC_TOLERANCE {
                return Some(f.clone());
            }
        }
    }

    fits.first().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;
    use crate::models::evaluate;

    fn sampled(coefficients: &[f64], n: usize) -> PointSet {
        (0..n)
            .map(|i| {
                let x = i as f64 * 0.5 - 2.0;
                // Small deterministic wobble so no fit is exact.
                let wobble = if i % 2 == 0 { 0.01 } else { -0.01 };
                Point::new(x, evaluate(coefficients, x) + wobble)
            })
            .collect()
    }

    #[test]
    fn prefers_linear_for_linear_data() {
        let points = sampled(&[1.0, 2.0], 12);
        let selection = compare_fits(&points, &[]).unwrap();
        assert_eq!(selection.fits.len(), 3);
        assert!(selection.skipped.is_empty());
        assert_eq!(selection.best.fit.curve_type, CurveType::Linear);
    }

    #[test]
    fn picks_cubic_for_cubic_data() {
        let points = sampled(&[0.5, -1.0, 0.0, 2.0], 12);
        let selection = compare_fits(&points, &CurveType::ALL).unwrap();
        assert_eq!(selection.best.fit.curve_type, CurveType::Cubic);
        assert!(selection.best.quality.sse < selection.fits[0].quality.sse);
    }

    #[test]
    fn skips_underdetermined_degrees() {
        let points = PointSet::new(vec![Point::new(0.0, 1.0), Point::new(1.0, 3.0)]);
        let selection = compare_fits(&points, &CurveType::ALL).unwrap();
        assert_eq!(selection.fits.len(), 1);
        assert_eq!(selection.best.fit.curve_type, CurveType::Linear);
        let skipped: Vec<CurveType> = selection.skipped.iter().map(|(c, _)| *c).collect();
        assert_eq!(skipped, vec![CurveType::Quadratic, CurveType::Cubic]);
    }

    #[test]
    fn fails_when_nothing_fits() {
        let points = PointSet::new(vec![Point::new(2.0, 3.0)]);
        assert_eq!(
            compare_fits(&points, &[CurveType::Quadratic]).unwrap_err(),
            FitError::SingularFit { distinct_x: 1, required: 3 }
        );
        assert_eq!(
            compare_fits(&PointSet::default(), &[]).unwrap_err(),
            FitError::EmptyInput
        );
    }
}

//! Least-squares polynomial fitting for a single curve type.
//!
//! - `linear` uses the closed-form covariance / variance ratio
//! - `quadratic` and `cubic` solve the normal equations of the Vandermonde
//!   design matrix built on a centred and scaled x axis, then map the
//!   coefficients back to the original x
//!
//! Every fit is a pure function of its inputs: no state survives between calls.

use nalgebra::DVector;

use crate::domain::{Coefficients, CurveType, FitResult, PointSet};
use crate::error::{FitError, Result};
use crate::math::{solve_least_squares, vandermonde};
use crate::models::evaluate_curve;

/// Fit `points` with the curve named by `curve_type` (`linear`, `quadratic`, `cubic`).
pub fn fit(points: &PointSet, curve_type: &str) -> Result<FitResult> {
    let curve_type: CurveType = curve_type.parse()?;
    fit_curve(points, curve_type)
}

/// Fit `points` with a polynomial of the given curve type.
pub fn fit_curve(points: &PointSet, curve_type: CurveType) -> Result<FitResult> {
    let coefficients = match curve_type {
        CurveType::Linear => {
            let (slope, intercept) = linear_fit(points)?;
            Coefficients::new(vec![intercept, slope])
        }
        CurveType::Quadratic | CurveType::Cubic => polynomial_fit(points, curve_type.degree())?,
    };

    let evaluated_curve = evaluate_curve(&coefficients, points);
    log::debug!(
        "{curve_type} fit over {} points: coefficients {:?}",
        points.len(),
        coefficients.as_slice()
    );

    Ok(FitResult {
        curve_type,
        coefficients,
        evaluated_curve,
    })
}

/// Least-squares slope of `points`.
pub fn slope(points: &PointSet) -> Result<f64> {
    linear_fit(points).map(|(slope, _)| slope)
}

/// Least-squares intercept of `points`.
pub fn intercept(points: &PointSet) -> Result<f64> {
    linear_fit(points).map(|(_, intercept)| intercept)
}

fn linear_fit(points: &PointSet) -> Result<(f64, f64)> {
    ensure_fittable(points, 1)?;

    let n = points.len() as f64;
    let x_bar = points.iter().map(|p| p.x).sum::<f64>() / n;
    let y_bar = points.iter().map(|p| p.y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var = 0.0;
    for p in points {
        let dx = p.x - x_bar;
        cov += dx * (p.y - y_bar);
        var += dx * dx;
    }
    if !(var.is_finite() && var > 0.0) {
        return Err(singular(points, 1));
    }

    let slope = cov / var;
    let intercept = y_bar - slope * x_bar;
    if !(slope.is_finite() && intercept.is_finite()) {
        return Err(singular(points, 1));
    }
    Ok((slope, intercept))
}

fn polynomial_fit(points: &PointSet, degree: usize) -> Result<Coefficients> {
    ensure_fittable(points, degree)?;

    // Map x onto roughly [-1, 1] so the powers stay comparable in size.
    let xs = points.xs();
    let center = xs.iter().sum::<f64>() / xs.len() as f64;
    let half_width = xs.iter().map(|x| (x - center).abs()).fold(0.0, f64::max);
    if !(half_width.is_finite() && half_width > 0.0) {
        return Err(singular(points, degree));
    }
    let us: Vec<f64> = xs.iter().map(|x| (x - center) / half_width).collect();

    let design = vandermonde(&us, degree);
    let y = DVector::from_vec(points.ys());
    let beta = solve_least_squares(&design, &y).ok_or_else(|| singular(points, degree))?;

    let coefficients = unscale_coefficients(beta.as_slice(), center, half_width);
    if !coefficients.iter().all(|c| c.is_finite()) {
        return Err(singular(points, degree));
    }
    Ok(Coefficients::new(coefficients))
}

/// Expand `Σ c_k ((x - center) / half_width)^k` into powers of `x`.
fn unscale_coefficients(scaled: &[f64], center: f64, half_width: f64) -> Vec<f64> {
    let mut out = vec![0.0; scaled.len()];
    for (k, &c) in scaled.iter().enumerate() {
        let factor = c / half_width.powi(k as i32);
        let mut binom = 1.0;
        for j in 0..=k {
            // binom = C(k, j)
            out[j] += factor * binom * (-center).powi((k - j) as i32);
            binom = binom * (k - j) as f64 / (j + 1) as f64;
        }
    }
    out
}

fn ensure_fittable(points: &PointSet, degree: usize) -> Result<()> {
    if points.is_empty() {
        return Err(FitError::EmptyInput);
    }
    if points.distinct_x_count() < degree + 1 {
        return Err(singular(points, degree));
    }
    Ok(())
}

fn singular(points: &PointSet, degree: usize) -> FitError {
    FitError::SingularFit {
        distinct_x: points.distinct_x_count(),
        required: degree + 1,
    }
}

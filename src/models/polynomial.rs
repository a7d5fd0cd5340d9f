//! Polynomial evaluation and equation rendering.
//!
//! The fitter relies on two primitive operations:
//! - evaluate `y(x)` for a coefficient vector (residuals, plots, exports)
//! - render the equation for display

use crate::domain::{Coefficients, CurveType, Point, PointSet};

/// Evaluate `Σ c_k x^k` (Horner's scheme). Coefficients are constant term first.
pub fn evaluate(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Replace each point's y with the fitted value, keeping x and order.
pub fn evaluate_curve(coefficients: &Coefficients, points: &PointSet) -> PointSet {
    points
        .iter()
        .map(|p| Point::new(p.x, evaluate(coefficients.as_slice(), p.x)))
        .collect()
}

/// Render `y = a_n x^n + … + a_1 x + a_0` with every term present.
///
/// The number of terms follows `curve_type`; missing coefficients render as `0`.
pub fn format_equation(coefficients: &Coefficients, curve_type: CurveType) -> String {
    render_equation(coefficients, curve_type, |c| format!("{c}"))
}

/// Same as [`format_equation`], with values rounded for terminal output.
pub fn format_equation_with_precision(
    coefficients: &Coefficients,
    curve_type: CurveType,
    precision: Option<usize>,
) -> String {
    match precision {
        Some(p) => render_equation(coefficients, curve_type, |c| format!("{c:.p$}")),
        None => format_equation(coefficients, curve_type),
    }
}

fn render_equation(
    coefficients: &Coefficients,
    curve_type: CurveType,
    fmt_value: impl Fn(f64) -> String,
) -> String {
    let terms: Vec<String> = (0..=curve_type.degree())
        .rev()
        .map(|k| {
            let value = fmt_value(coefficients.get(k));
            match k {
                0 => value,
                1 => format!("{value}x"),
                _ => format!("{value}x^{k}"),
            }
        })
        .collect();
    format!("y = {}", terms.join(" + "))
}

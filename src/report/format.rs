//! Terminal formatting for fits and comparisons.

use crate::domain::{FitQuality, FitResult, Residual};
use crate::fit::FitSelection;
use crate::io::ingest::IngestedPoints;
use crate::models::format_equation_with_precision;

/// Format the full run summary (input stats + equation + coefficients + diagnostics).
pub fn format_run_summary(
    ingest: &IngestedPoints,
    fit: &FitResult,
    quality: &FitQuality,
    precision: Option<usize>,
) -> String {
    let mut out = String::new();

    out.push_str("=== curvefit - least-squares polynomial fit ===\n");
    out.push_str(&format!("Source: {}\n", ingest.source_label));
    out.push_str(&format!(
        "Points: n={} (skipped {})\n",
        ingest.points.len(),
        ingest.skipped()
    ));
    if let Some((x_min, x_max)) = ingest.points.x_range() {
        out.push_str(&format!("x range: [{}, {}]\n", fmt_value(x_min, precision), fmt_value(x_max, precision)));
    }

    out.push_str(&format!("\nCurve: {} (degree {})\n", fit.curve_type, fit.curve_type.degree()));
    out.push_str(&format!(
        "{}\n",
        format_equation_with_precision(&fit.coefficients, fit.curve_type, precision)
    ));
    out.push_str(&format!(
        "coefficients (constant first): {}\n",
        fmt_vec(fit.coefficients.as_slice(), precision)
    ));
    out.push_str(&format!("{}\n", format_quality(quality)));

    out
}

/// One-line diagnostics.
pub fn format_quality(quality: &FitQuality) -> String {
    let r2 = quality
        .r_squared
        .map(|v| format!("{v:.6}"))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "SSE={:.6} RMSE={:.6} R2={r2} BIC={:.3} n={}",
        quality.sse, quality.rmse, quality.bic, quality.n
    )
}

/// Table of observed vs fitted values, in input order.
pub fn format_residual_table(residuals: &[Residual], precision: Option<usize>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>14} {:>14} {:>14} {:>14}\n",
        "x", "y_obs", "y_fit", "residual"
    ));
    for r in residuals {
        out.push_str(&format!(
            "{:>14} {:>14} {:>14} {:>14}\n",
            fmt_value(r.point.x, precision),
            fmt_value(r.point.y, precision),
            fmt_value(r.y_fit, precision),
            fmt_value(r.residual, precision),
        ));
    }
    out
}

/// Diagnostics for every compared degree; the selected fit is marked with `*`.
pub fn format_comparison(selection: &FitSelection, precision: Option<usize>) -> String {
    let mut out = String::new();

    out.push_str("Curve diagnostics:\n");
    for scored in &selection.fits {
        let chosen = if scored.fit.curve_type == selection.best.fit.curve_type {
            "*"
        } else {
            " "
        };
        out.push_str(&format!(
            "{chosen} {:<10} {}\n",
            scored.fit.curve_type.name(),
            format_quality(&scored.quality)
        ));
    }
    for (curve_type, reason) in &selection.skipped {
        out.push_str(&format!("  (skipped {curve_type}) {reason}\n"));
    }

    let best = &selection.best.fit;
    out.push_str(&format!("\nChosen: {}\n", best.curve_type));
    out.push_str(&format!(
        "{}\n",
        format_equation_with_precision(&best.coefficients, best.curve_type, precision)
    ));

    out
}

fn fmt_value(v: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{v:.p$}"),
        None => format!("{v}"),
    }
}

fn fmt_vec(values: &[f64], precision: Option<usize>) -> String {
    let parts: Vec<String> = values.iter().map(|&v| fmt_value(v, precision)).collect();
    format!("[{}]", parts.join(", "))
}

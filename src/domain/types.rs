//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// A single observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Ordered sequence of points. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointSet(Vec<Point>);

impl PointSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// The points a fresh session starts with.
    pub fn starter() -> Self {
        [(1.0, 2.0), (3.0, 7.0), (5.0, 6.0), (6.0, 9.0), (7.0, 12.0), (9.0, 20.0)]
            .into_iter()
            .map(|(x, y)| Point::new(x, y))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.0.iter()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.y).collect()
    }

    /// Number of distinct x values (exact comparison).
    pub fn distinct_x_count(&self) -> usize {
        let mut xs = self.xs();
        xs.sort_by(|a, b| a.total_cmp(b));
        xs.dedup();
        xs.len()
    }

    /// `(min, max)` of the x values, or `None` when empty or non-finite.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        for p in &self.0 {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
        }
        (min_x.is_finite() && max_x.is_finite()).then_some((min_x, max_x))
    }

    pub fn into_inner(self) -> Vec<Point> {
        self.0
    }
}

impl From<Vec<Point>> for PointSet {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}

impl FromIterator<Point> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One `x,y` token per line, the same format the parser accepts.
impl fmt::Display for PointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

/// Requested polynomial family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveType {
    Linear,
    Quadratic,
    Cubic,
}

impl CurveType {
    /// All supported curve types, simplest first.
    pub const ALL: [CurveType; 3] = [CurveType::Linear, CurveType::Quadratic, CurveType::Cubic];

    pub fn degree(self) -> usize {
        match self {
            CurveType::Linear => 1,
            CurveType::Quadratic => 2,
            CurveType::Cubic => 3,
        }
    }

    /// Number of coefficients (`degree + 1`).
    pub fn coefficient_count(self) -> usize {
        self.degree() + 1
    }

    /// Selector string accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            CurveType::Linear => "linear",
            CurveType::Quadratic => "quadratic",
            CurveType::Cubic => "cubic",
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveType {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(CurveType::Linear),
            "quadratic" => Ok(CurveType::Quadratic),
            "cubic" => Ok(CurveType::Cubic),
            other => Err(FitError::UnsupportedCurveType(other.to_string())),
        }
    }
}

/// Polynomial coefficients, constant term first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coefficients(Vec<f64>);

impl Coefficients {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn degree(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Coefficient of `x^k`; zero beyond the stored degree.
    pub fn get(&self, k: usize) -> f64 {
        self.0.get(k).copied().unwrap_or(0.0)
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

/// Output of one fit call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub curve_type: CurveType,
    pub coefficients: Coefficients,
    /// Input x values paired with fitted y values, in input order.
    pub evaluated_curve: PointSet,
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    /// `None` when the observed y values have no variance.
    pub r_squared: Option<f64>,
    pub bic: f64,
    pub n: usize,
}

/// A per-point fitted result (used for reports, plots and exports).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Residual {
    pub point: Point,
    pub y_fit: f64,
    pub residual: f64,
}

/// Where the CLI reads points from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointSource {
    /// Raw `x,y` text given on the command line.
    Inline(String),
    /// A text file of `x,y` tokens.
    File(PathBuf),
    /// A headered CSV with `x` and `y` columns.
    Csv(PathBuf),
    /// `x,y` tokens read from standard input.
    Stdin,
    /// The built-in starter points.
    Starter,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and environment).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub source: PointSource,
    /// Raw curve-type selector; validated by the engine.
    pub curve: String,
    /// Decimal places for terminal output (`None` prints full precision).
    pub precision: Option<usize>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub curve_type: CurveType,
    pub coefficients: Coefficients,
    pub equation: String,
    pub fit_quality: FitQuality,
    pub grid: CurveGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_type_parses_known_selectors_only() {
        assert_eq!("linear".parse::<CurveType>(), Ok(CurveType::Linear));
        assert_eq!("quadratic".parse::<CurveType>(), Ok(CurveType::Quadratic));
        assert_eq!("cubic".parse::<CurveType>(), Ok(CurveType::Cubic));
        assert_eq!(
            "Linear".parse::<CurveType>(),
            Err(FitError::UnsupportedCurveType("Linear".to_string()))
        );
        assert_eq!(
            "quartic".parse::<CurveType>(),
            Err(FitError::UnsupportedCurveType("quartic".to_string()))
        );
    }

    #[test]
    fn distinct_x_count_ignores_duplicates() {
        let points: PointSet = [(1.0, 2.0), (1.0, 3.0), (2.0, 3.0)]
            .into_iter()
            .map(|(x, y)| Point::new(x, y))
            .collect();
        assert_eq!(points.distinct_x_count(), 2);
        assert_eq!(points.x_range(), Some((1.0, 2.0)));
        assert_eq!(PointSet::default().x_range(), None);
    }

    #[test]
    fn point_set_displays_as_parser_tokens() {
        let points = PointSet::new(vec![Point::new(1.0, 2.5), Point::new(-3.0, 4.0)]);
        assert_eq!(points.to_string(), "1,2.5\n-3,4");
    }

    #[test]
    fn coefficients_pad_with_zero() {
        let c = Coefficients::new(vec![1.0, 2.0]);
        assert_eq!(c.degree(), 1);
        assert_eq!(c.get(1), 2.0);
        assert_eq!(c.get(3), 0.0);
    }
}

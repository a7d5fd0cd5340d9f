//! Point ingest: free-form `x,y` text and headered CSV files.
//!
//! Both paths share the same policy:
//! - **filter, don't reject**: malformed tokens/rows are skipped, never fatal
//! - **order preserved**: valid points keep their left-to-right / top-to-bottom order
//! - only I/O problems and a missing CSV schema are errors (exit code 2)

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{Point, PointSet, PointSource};
use crate::error::AppError;

/// A CSV row that could not be turned into a point.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: points + where they came from + what was dropped.
#[derive(Debug, Clone)]
pub struct IngestedPoints {
    pub points: PointSet,
    pub source_label: String,
    /// Tokens (text input) or records (CSV input) examined.
    pub entries_read: usize,
    /// Per-row diagnostics (CSV input only; text tokens are dropped silently).
    pub row_errors: Vec<RowError>,
}

impl IngestedPoints {
    pub fn from_points(points: PointSet, source_label: impl Into<String>) -> Self {
        Self {
            entries_read: points.len(),
            points,
            source_label: source_label.into(),
            row_errors: Vec::new(),
        }
    }

    /// Number of entries that did not produce a point.
    pub fn skipped(&self) -> usize {
        self.entries_read.saturating_sub(self.points.len())
    }
}

/// Parse whitespace-delimited `x,y` tokens into points.
///
/// Tokens are separated by spaces, newlines or tabs. A token is kept only if it
/// has exactly two comma-separated fields that both parse as finite numbers;
/// anything else is dropped. Absent or empty input yields an empty set.
pub fn parse_points(raw: Option<&str>) -> PointSet {
    let Some(raw) = raw else {
        return PointSet::default();
    };
    tokens(raw).filter_map(parse_token).collect()
}

/// Load points from any supported source.
pub fn load_points(source: &PointSource) -> Result<IngestedPoints, AppError> {
    match source {
        PointSource::Inline(raw) => Ok(load_points_text(raw, "command line")),
        PointSource::File(path) => {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                AppError::new(2, format!("Failed to read points file '{}': {e}", path.display()))
            })?;
            Ok(load_points_text(&raw, path.display().to_string()))
        }
        PointSource::Stdin => {
            let raw = std::io::read_to_string(std::io::stdin())
                .map_err(|e| AppError::new(2, format!("Failed to read points from stdin: {e}")))?;
            Ok(load_points_text(&raw, "stdin"))
        }
        PointSource::Csv(path) => load_points_csv(path),
        PointSource::Starter => Ok(IngestedPoints::from_points(
            PointSet::starter(),
            "starter points",
        )),
    }
}

/// Parse `x,y` text and record how many tokens were examined.
pub fn load_points_text(raw: &str, source_label: impl Into<String>) -> IngestedPoints {
    let points = parse_points(Some(raw));
    let entries_read = tokens(raw).count();
    let source_label = source_label.into();
    if entries_read > points.len() {
        log::info!(
            "{source_label}: dropped {} malformed token(s)",
            entries_read - points.len()
        );
    }
    IngestedPoints {
        points,
        source_label,
        entries_read,
        row_errors: Vec::new(),
    }
}

/// Load points from a headered CSV with `x` and `y` columns.
pub fn load_points_csv(path: &Path) -> Result<IngestedPoints, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let x_idx = *header_map
        .get("x")
        .ok_or_else(|| AppError::new(2, "Missing required column: `x`"))?;
    let y_idx = *header_map
        .get("y")
        .ok_or_else(|| AppError::new(2, "Missing required column: `y`"))?;

    let mut points = Vec::new();
    let mut row_errors = Vec::new();
    let mut entries_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header, lines are 1-based.
        let line = idx + 2;
        entries_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_record(&record, x_idx, y_idx) {
            Ok(point) => points.push(point),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    for err in &row_errors {
        log::debug!("{}:{}: {}", path.display(), err.line, err.message);
    }

    Ok(IngestedPoints {
        points: PointSet::new(points),
        source_label: path.display().to_string(),
        entries_read,
        row_errors,
    })
}

fn tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split([' ', '\n', '\t'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn parse_token(token: &str) -> Option<Point> {
    let mut fields = token.split(',');
    let (Some(x), Some(y), None) = (fields.next(), fields.next(), fields.next()) else {
        log::trace!("dropping token {token:?}: expected two fields");
        return None;
    };
    match (parse_number(x), parse_number(y)) {
        (Some(x), Some(y)) => Some(Point::new(x, y)),
        _ => {
            log::trace!("dropping token {token:?}: not a number pair");
            None
        }
    }
}

fn parse_number(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_record(record: &StringRecord, x_idx: usize, y_idx: usize) -> Result<Point, String> {
    let x = record
        .get(x_idx)
        .and_then(parse_number)
        .ok_or_else(|| "Missing/invalid `x` value.".to_string())?;
    let y = record
        .get(y_idx)
        .and_then(parse_number)
        .ok_or_else(|| "Missing/invalid `y` value.".to_string())?;
    Ok(Point::new(x, y))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("curvefit_{}_{name}", std::process::id()))
    }

    #[test]
    fn parses_mixed_delimiters_and_drops_garbage() {
        let points = parse_points(Some("1,2 3,7\n5,6\tbad 6,9"));
        assert_eq!(
            points.as_slice(),
            pts(&[(1.0, 2.0), (3.0, 7.0), (5.0, 6.0), (6.0, 9.0)]).as_slice()
        );
    }

    #[test]
    fn absent_or_blank_input_is_empty() {
        assert!(parse_points(None).is_empty());
        assert!(parse_points(Some("")).is_empty());
        assert!(parse_points(Some("  \n\t  ")).is_empty());
    }

    #[test]
    fn field_count_must_be_two() {
        let points = parse_points(Some("1,2,3 4 5, 6,7 ,8 9,10"));
        assert_eq!(points.as_slice(), pts(&[(6.0, 7.0), (9.0, 10.0)]).as_slice());
    }

    #[test]
    fn accepts_signs_and_exponents() {
        let points = parse_points(Some("-3,1.5 2e1,-0.25 +4,.5"));
        assert_eq!(
            points.as_slice(),
            pts(&[(-3.0, 1.5), (20.0, -0.25), (4.0, 0.5)]).as_slice()
        );
    }

    #[test]
    fn rejects_non_numeric_and_non_finite() {
        let points = parse_points(Some("a,1 1,b inf,1 1,NaN 1e400,2 2,3"));
        assert_eq!(points.as_slice(), pts(&[(2.0, 3.0)]).as_slice());
    }

    #[test]
    fn windows_line_endings_are_trimmed() {
        let points = parse_points(Some("1,2\r\n3,4\r\n"));
        assert_eq!(points.as_slice(), pts(&[(1.0, 2.0), (3.0, 4.0)]).as_slice());
    }

    #[test]
    fn text_ingest_counts_dropped_tokens() {
        let ingest = load_points_text("1,2 x 3,4 5;6", "test");
        assert_eq!(ingest.points.len(), 2);
        assert_eq!(ingest.entries_read, 4);
        assert_eq!(ingest.skipped(), 2);
    }

    #[test]
    fn starter_source_loads_builtin_points() {
        let ingest = load_points(&PointSource::Starter).unwrap();
        assert_eq!(ingest.points, PointSet::starter());
        assert_eq!(ingest.skipped(), 0);
    }

    #[test]
    fn csv_ingest_skips_bad_rows() {
        let path = temp_path("ingest.csv");
        std::fs::write(&path, "\u{feff}Label, X ,Y\na,1,2\nb,oops,3\nc,4\nd,5,6\n").unwrap();

        let ingest = load_points_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ingest.points.as_slice(), pts(&[(1.0, 2.0), (5.0, 6.0)]).as_slice());
        assert_eq!(ingest.entries_read, 4);
        assert_eq!(ingest.row_errors.len(), 2);
        assert_eq!(ingest.row_errors[0].line, 3);
        assert_eq!(ingest.row_errors[1].line, 4);
    }

    #[test]
    fn csv_without_y_column_is_an_error() {
        let path = temp_path("no_y.csv");
        std::fs::write(&path, "x,z\n1,2\n").unwrap();

        let err = load_points_csv(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("`y`"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_points(&PointSource::File(temp_path("does_not_exist.txt"))).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}

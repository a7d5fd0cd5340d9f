//! Error types.
//!
//! - `FitError` is raised by the regression core (parsing never fails).
//! - `AppError` is what the binary reports: a message plus a process exit code.

/// Failures of a single fit request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FitError {
    /// No points were supplied.
    #[error("No points to fit.")]
    EmptyInput,

    /// The points do not determine a unique polynomial of the requested degree.
    #[error(
        "Points do not determine a unique fit: {distinct_x} distinct x value(s), need at least {required}."
    )]
    SingularFit { distinct_x: usize, required: usize },

    /// The curve-type selector is not one of `linear`, `quadratic`, `cubic`.
    #[error("Unsupported curve type '{0}' (expected linear, quadratic or cubic).")]
    UnsupportedCurveType(String),
}

pub type Result<T> = std::result::Result<T, FitError>;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let exit_code = match err {
            FitError::UnsupportedCurveType(_) => 2,
            FitError::EmptyInput => 3,
            FitError::SingularFit { .. } => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_errors_map_to_exit_codes() {
        assert_eq!(AppError::from(FitError::EmptyInput).exit_code(), 3);
        assert_eq!(
            AppError::from(FitError::SingularFit { distinct_x: 1, required: 3 }).exit_code(),
            4
        );
        let err = AppError::from(FitError::UnsupportedCurveType("sine".to_string()));
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("'sine'"));
    }
}

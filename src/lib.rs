//! `curve-fit` library crate.
//!
//! The binary (`curvefit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the regression core (`io::parse_points`, `fit::fit`, `models::format_equation`)
//!   can be embedded by other front-ends
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;

pub use domain::{Coefficients, CurveType, FitResult, Point, PointSet};
pub use error::FitError;
pub use fit::fit;
pub use io::parse_points;
pub use models::format_equation;

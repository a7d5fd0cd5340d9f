//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - observations (`Point`, `PointSet`)
//! - the curve selector (`CurveType`)
//! - fit outputs (`Coefficients`, `FitResult`, `FitQuality`, `Residual`)
//! - run configuration and the saved curve file (`FitConfig`, `CurveFile`)

pub mod types;

pub use types::*;

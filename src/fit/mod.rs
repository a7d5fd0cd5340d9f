//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - fit a single curve type by least squares (`engine`)
//! - fit every degree in parallel and select the best using BIC (`selection`)

pub mod engine;
pub mod selection;

pub use engine::*;
pub use selection::*;

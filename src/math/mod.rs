//! Mathematical utilities: Vandermonde design matrices and least squares.

pub mod ols;

pub use ols::*;

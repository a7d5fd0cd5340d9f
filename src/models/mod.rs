//! Polynomial model implementations.
//!
//! Models are implemented as small, pure functions so that fitting code can
//! stay generic over the degree.

pub mod polynomial;

pub use polynomial::*;

//! Input/output helpers.
//!
//! - point parsing + CSV ingest (`ingest`)
//! - per-point result export (`export`)
//! - curve JSON read/write (`curve`)

pub mod curve;
pub mod export;
pub mod ingest;

pub use curve::*;
pub use export::*;
pub use ingest::*;

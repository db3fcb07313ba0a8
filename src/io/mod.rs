//! Input/output helpers.
//!
//! - projection exports (JSON) (`export`)

pub mod export;

pub use export::*;

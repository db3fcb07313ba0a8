//! Data-access layer over the survey dataset.
//!
//! - loading + structural validation (`dataset`)
//! - read-only getters and bilingual lookups (`accessors`)
//! - derived views: time-series windows, top-N, significance filters (`derive`)

pub mod accessors;
pub mod dataset;
pub mod derive;

pub use accessors::*;
pub use dataset::*;
pub use derive::*;

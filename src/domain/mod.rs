//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - identifiers with closed value sets (`Locale`, `PeriodId`, `MonthKey`, `UiLabel`)
//! - the dataset document (`Dataset` and everything it contains)
//! - bilingual text (`BilingualText`)

pub mod types;

pub use types::*;

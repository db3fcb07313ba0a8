//! Localization.
//!
//! - embedded uk/en message bundles and dot-path lookup (`messages`)
//! - the active locale with its persisted preference (`context`)

pub mod context;
pub mod messages;

pub use context::*;
pub use messages::*;

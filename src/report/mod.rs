//! Reporting: change classification, chart projections, and formatted
//! terminal output.

pub mod change;
pub mod chart;
pub mod format;

pub use change::*;
pub use chart::*;
pub use format::*;

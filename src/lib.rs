//! `uelectoral` library crate.
//!
//! The binary (`uel`) is a thin wrapper around this library so that:
//!
//! - dataset access and report formatting are testable without spawning processes
//! - the localized projections can back other front-ends (web export, notebooks)
//! - code stays easy to navigate as the dataset grows

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod io;
pub mod logging;
pub mod period;
pub mod plot;
pub mod report;

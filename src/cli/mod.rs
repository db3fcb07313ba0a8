//! Command-line parsing for the `uel` survey report tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! data layer and the report formatting.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{Locale, PeriodId};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "uel", version, about = "Ukrainian electoral sentiment survey reports")]
pub struct Cli {
    /// Language for this run only (the saved preference is not changed).
    #[arg(long, global = true, value_enum)]
    pub locale: Option<Locale>,

    /// Dataset JSON to use instead of the embedded one.
    #[arg(long, global = true, value_name = "JSON")]
    pub data: Option<PathBuf>,

    /// Locale preference file.
    #[arg(long, global = true, value_name = "FILE")]
    pub prefs: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Project header, survey dates, and methodology.
    Summary,
    /// Country-direction time series as a table and line chart.
    Direction(DirectionArgs),
    /// Presidential poll: current vs previous wave.
    Presidential(ElectionArgs),
    /// Parliamentary poll: current vs previous wave.
    Parliamentary(ElectionArgs),
    /// Show or change the saved language.
    Locale(LocaleArgs),
    /// Check the dataset for consistency problems.
    Check,
}

#[derive(Debug, Args, Clone)]
pub struct DirectionArgs {
    /// Only the last N points.
    #[arg(long, conflicts_with_all = ["from", "to", "year"])]
    pub recent: Option<usize>,

    /// First month to include (YYYY-MM).
    #[arg(long, value_parser = parse_period)]
    pub from: Option<PeriodId>,

    /// Last month to include (YYYY-MM).
    #[arg(long, value_parser = parse_period)]
    pub to: Option<PeriodId>,

    /// Only points from this calendar year.
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub year: Option<u16>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ElectionArgs {
    /// Show only the N entries with the highest current value.
    #[arg(long)]
    pub top: Option<usize>,

    /// Bar chart width (columns).
    #[arg(long, default_value_t = 40)]
    pub width: usize,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Write the projection to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct LocaleArgs {
    #[command(subcommand)]
    pub action: Option<LocaleAction>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum LocaleAction {
    /// Save a new language preference.
    Set {
        #[arg(value_enum)]
        locale: Locale,
    },
}

fn parse_period(s: &str) -> Result<PeriodId, String> {
    s.parse()
}

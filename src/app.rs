//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and environment settings
//! - installs logging
//! - loads the dataset and the locale context
//! - prints reports/plots
//! - writes optional exports

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use crate::cli::{Cli, Command, DirectionArgs, ElectionArgs, LocaleAction, LocaleArgs};
use crate::config::{Settings, default_prefs_path};
use crate::domain::{Dataset, ElectionKind, Locale};
use crate::error::{AppError, EXIT_INCONSISTENT, EXIT_USAGE};
use crate::i18n::{FilePreferenceStore, LocaleContext, MemoryPreferenceStore, PreferenceStore};
use crate::io::export::{ProjectionExport, write_projection_json};
use crate::report::chart::{
    DirectionChartPoint, direction_series, transform_country_direction_for_chart,
    transform_parliamentary_for_chart, transform_presidential_for_chart,
};

type Context = LocaleContext<Box<dyn PreferenceStore>>;

/// Entry point for the `uel` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let settings = Settings::from_env();
    crate::logging::init(cli.verbose, settings.log_filter.as_deref());

    let data_path = cli.data.clone().or(settings.data_path.clone());
    let prefs_path = resolve_prefs_path(cli.prefs.clone(), &settings)?;
    debug!(data = ?data_path, prefs = %prefs_path.display(), "resolved paths");

    if let Command::Locale(args) = &cli.command {
        return handle_locale(args, prefs_path);
    }

    let ctx = locale_context(cli.locale, prefs_path)?;
    let ds = Dataset::load(data_path.as_deref())?;

    match cli.command {
        Command::Summary => handle_summary(&ds, &ctx),
        Command::Direction(args) => handle_direction(&ds, &ctx, &args),
        Command::Presidential(args) => handle_election(&ds, &ctx, ElectionKind::Presidential, &args),
        Command::Parliamentary(args) => handle_election(&ds, &ctx, ElectionKind::Parliamentary, &args),
        Command::Check => handle_check(&ds, &ctx),
        Command::Locale(_) => Ok(()),
    }
}

fn resolve_prefs_path(flag: Option<PathBuf>, settings: &Settings) -> Result<PathBuf, AppError> {
    flag.or_else(|| settings.prefs_path.clone())
        .or_else(default_prefs_path)
        .ok_or_else(|| {
            AppError::new(
                EXIT_USAGE,
                "Cannot determine a config directory; pass --prefs or set UELECTORAL_PREFS.",
            )
        })
}

/// A `--locale` override is served from memory so the saved preference is
/// left untouched.
fn locale_context(override_locale: Option<Locale>, prefs_path: PathBuf) -> Result<Context, AppError> {
    let store: Box<dyn PreferenceStore> = match override_locale {
        Some(locale) => Box::new(MemoryPreferenceStore::with_value(locale.code())),
        None => Box::new(FilePreferenceStore::new(prefs_path)),
    };
    Ok(LocaleContext::new(store)?)
}

fn handle_summary(ds: &Dataset, ctx: &Context) -> Result<(), AppError> {
    println!("{}", crate::report::format_summary(ds, ctx)?);
    Ok(())
}

fn handle_direction(ds: &Dataset, ctx: &Context, args: &DirectionArgs) -> Result<(), AppError> {
    let points = select_direction_points(ds, args);
    let legend = direction_series(ds, ctx.locale());

    println!("{}", crate::report::format_direction_table(ds, &points, &legend, ctx));

    if !args.no_plot && !points.is_empty() {
        let caption = ctx.t("report.plot");
        let plot = crate::plot::render_line_chart(&points, &legend, ctx.locale(), &caption, args.width, args.height);
        println!("{plot}");
    }
    Ok(())
}

fn select_direction_points(ds: &Dataset, args: &DirectionArgs) -> Vec<DirectionChartPoint> {
    if let Some(n) = args.recent {
        return ds.recent_time_series(n).iter().map(DirectionChartPoint::from).collect();
    }
    if let Some(year) = args.year {
        return ds.time_series_by_year(year).into_iter().map(DirectionChartPoint::from).collect();
    }
    if args.from.is_none() && args.to.is_none() {
        return transform_country_direction_for_chart(ds);
    }

    let months = ds.country_direction().time_series.iter().map(|p| p.month);
    let start = args.from.or_else(|| months.clone().min());
    let end = args.to.or_else(|| months.max());
    match (start, end) {
        (Some(start), Some(end)) => ds
            .time_series_range(start, end)
            .into_iter()
            .map(DirectionChartPoint::from)
            .collect(),
        _ => Vec::new(),
    }
}

fn handle_election(ds: &Dataset, ctx: &Context, kind: ElectionKind, args: &ElectionArgs) -> Result<(), AppError> {
    let locale = ctx.locale();
    let mut bars = match kind {
        ElectionKind::Presidential => transform_presidential_for_chart(ds, locale),
        ElectionKind::Parliamentary => transform_parliamentary_for_chart(ds, locale),
    };

    if let Some(n) = args.top {
        let top = match kind {
            ElectionKind::Presidential => ds.top_presidential_candidates(n),
            ElectionKind::Parliamentary => ds.top_parliamentary_parties(n),
        };
        bars.retain(|b| top.iter().any(|e| e.id == b.id));
    }

    println!("{}", crate::report::format_projection(ds, kind, &bars, ctx)?);
    println!("{}", crate::report::format_significant_changes(ds, kind, ctx));

    if !args.no_plot {
        let (current, previous) = (ctx.t("report.current"), ctx.t("report.previous"));
        let plot = crate::plot::render_bar_chart(&bars, args.width, (current.as_str(), previous.as_str()));
        println!("{plot}");
    }

    if let Some(path) = &args.export {
        write_projection_json(path, &ProjectionExport::new(ds, kind, locale, &bars))?;
    }

    Ok(())
}

fn handle_locale(args: &LocaleArgs, prefs_path: PathBuf) -> Result<(), AppError> {
    let mut ctx = LocaleContext::new(FilePreferenceStore::new(prefs_path))?;

    match &args.action {
        None => print!("{}", crate::report::format_locale_status(&ctx)),
        Some(LocaleAction::Set { locale }) => {
            ctx.set_locale(*locale)?;
            println!(
                "{}: {} ({})",
                ctx.t("locale.saved"),
                locale.native_name(),
                ctx.store().path().display()
            );
        }
    }
    Ok(())
}

fn handle_check(ds: &Dataset, ctx: &Context) -> Result<(), AppError> {
    let problems = ds.consistency_report();
    print!("{}", crate::report::format_check_report(&problems, ctx));

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::new(
            EXIT_INCONSISTENT,
            format!("{} consistency problem(s) found.", problems.len()),
        ))
    }
}

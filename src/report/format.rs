//! Formatted terminal output.
//!
//! All user-facing report text is assembled here so that:
//! - the data layer stays free of presentation concerns
//! - output changes are localized (and easy to snapshot in tests)

use crate::data::{sort_by_value, valid_vote_share};
use crate::domain::{Dataset, ElectionKind, Locale, UiLabel};
use crate::error::DataError;
use crate::i18n::{LocaleContext, PreferenceStore, interpolate};
use crate::period::format_chart_period;
use crate::report::change::format_percent;
use crate::report::chart::{ChartBar, DirectionChartPoint, SeriesLegend, direction_series};

const NAME_WIDTH: usize = 28;
const NUM_WIDTH: usize = 10;

/// Project header, survey dates, and methodology.
pub fn format_summary<S: PreferenceStore>(ds: &Dataset, ctx: &LocaleContext<S>) -> Result<String, DataError> {
    let locale = ctx.locale();
    let meta = ds.metadata();
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", ds.project_full_title(locale)));
    out.push_str(&format!(
        "{}: {} ({})\n",
        ctx.t("report.source"),
        meta.source.name,
        meta.source.website
    ));
    out.push_str(&format!(
        "{} | {} {}\n",
        ds.prepared_by_text(locale),
        ctx.t("report.commissionedBy"),
        ds.commissioner().name.get(locale)
    ));
    out.push_str(&format!("{}: {}\n", ctx.t("report.lastUpdated"), meta.last_updated));
    out.push('\n');

    out.push_str(&format!(
        "{}: {} ({})\n",
        ctx.t("report.current"),
        ds.current_display_date(locale)?,
        ds.format_period(&ds.current_survey_id().to_string(), locale)?
    ));
    out.push_str(&format!(
        "{}: {} ({})\n",
        ctx.t("report.previous"),
        ds.previous_display_date(locale)?,
        ds.format_period(&ds.previous_survey_id().to_string(), locale)?
    ));

    let surveys = ds
        .surveys
        .keys()
        .map(|id| ds.format_period(&id.to_string(), locale))
        .collect::<Result<Vec<_>, _>>()?;
    out.push_str(&format!("{}: {}\n", ctx.t("report.surveys"), surveys.join(", ")));

    if let Some(point) = ds.latest_time_series_point() {
        let legend = direction_series(ds, locale);
        let values = [point.right_direction, point.wrong_direction, point.hard_to_say];
        let parts: Vec<String> = legend
            .iter()
            .zip(values)
            .map(|(s, v)| format!("{} {}", s.label, format_percent(v)))
            .collect();
        out.push_str(&format!(
            "{} ({}): {}\n",
            ctx.t("report.latest"),
            format_chart_period(&point.period, locale),
            parts.join(" | ")
        ));
    }

    let m = ds.methodology();
    out.push_str(&format!("\n{}:\n", ds.navigation_labels(locale).methodology));
    for field in [&m.method, &m.target_audience] {
        out.push_str(&format!("- {}: {}", field.title.get(locale), field.value.get(locale)));
        if let Some(details) = &field.details {
            out.push_str(&format!(" ({})", details.get(locale)));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "- {}: {} {}\n",
        m.sample.title.get(locale),
        ds.sample_size(),
        ds.ui_label(UiLabel::Respondents, locale)?
    ));
    out.push_str(&format!(
        "- {}: {}\n",
        m.margin_of_error.title.get(locale),
        m.margin_of_error.text.get(locale)
    ));
    out.push('\n');
    out.push_str(&interpolate(&ctx.t("report.sampleNote"), &[("size", &ds.sample_size().to_string())]));
    out.push('\n');

    Ok(out)
}

/// Period-by-period table of the country-direction series.
pub fn format_direction_table<S: PreferenceStore>(
    ds: &Dataset,
    points: &[DirectionChartPoint],
    legend: &[SeriesLegend<'_>],
    ctx: &LocaleContext<S>,
) -> String {
    let locale = ctx.locale();
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", ds.navigation_labels(locale).direction));
    out.push_str(&format!("{}\n\n", ds.country_direction_question(locale)));

    if points.is_empty() {
        out.push_str(&format!("{}\n", ctx.t("report.noData")));
        return out;
    }

    let widths: Vec<usize> = legend
        .iter()
        .map(|s| s.label.chars().count().max(NUM_WIDTH))
        .collect();

    let mut header = format!("{:<10}", ctx.t("report.period"));
    let mut rule = format!("{:-<10}", "");
    for (s, w) in legend.iter().zip(widths.iter().copied()) {
        header.push_str(&format!(" {:>w$}", s.label));
        rule.push_str(&format!(" {:-<w$}", ""));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for p in points {
        let mut row = format!("{:<10}", format_chart_period(&p.period, locale));
        for (s, w) in legend.iter().zip(widths.iter().copied()) {
            row.push_str(&format!(" {:>w$}", format_percent(p.value(s.kind))));
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }

    out
}

/// Current-vs-previous table for one ballot question, followed by the other
/// answers and the decided share.
pub fn format_projection<S: PreferenceStore>(
    ds: &Dataset,
    kind: ElectionKind,
    bars: &[ChartBar],
    ctx: &LocaleContext<S>,
) -> Result<String, DataError> {
    let locale = ctx.locale();
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", ds.election_title(kind, locale)));
    out.push_str(&format!("{}\n", ds.election_question(kind, locale)));
    out.push_str(&format!(
        "{}: {} | {}: {}\n\n",
        ctx.t("report.current"),
        ds.current_month_name(locale)?,
        ctx.t("report.previous"),
        ds.previous_survey()?.month_name.get(locale)
    ));

    out.push_str(&format_bar_table(bars, ctx));
    out.push_str(&format!("{}\n", ds.ui_label(UiLabel::StatisticalNote, locale)?));

    let current = ds.current_survey_id();
    let others = sort_by_value(ds.other_options(kind), current, true);
    if !others.is_empty() {
        out.push_str(&format!("\n{}:\n", ctx.t("report.otherOptions")));
        for option in others {
            let value = match option.results.get(current).and_then(|r| r.value) {
                Some(v) => format_percent(v),
                None => ctx.t("report.noData"),
            };
            out.push_str(&format!("- {}: {value}\n", option.name.get(locale)));
        }
    }

    let share = valid_vote_share(ds.contenders(kind), ds.other_options(kind), current);
    out.push_str(&format!("\n{}: {}\n", ctx.t("report.validShare"), format_percent(share)));

    Ok(out)
}

fn format_bar_table<S: PreferenceStore>(bars: &[ChartBar], ctx: &LocaleContext<S>) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<NAME_WIDTH$} {:>NUM_WIDTH$} {:>NUM_WIDTH$} {:>NUM_WIDTH$}",
            "",
            ctx.t("report.current"),
            ctx.t("report.previous"),
            ctx.t("report.change"),
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&format!(
        "{:-<NAME_WIDTH$} {:-<NUM_WIDTH$} {:-<NUM_WIDTH$} {:-<NUM_WIDTH$}\n",
        "", "", "", ""
    ));

    for b in bars {
        out.push_str(
            format!(
                "{:<NAME_WIDTH$} {:>NUM_WIDTH$} {:>NUM_WIDTH$} {:>NUM_WIDTH$}",
                truncate(&b.name, NAME_WIDTH),
                format_percent(b.current),
                format_percent(b.previous),
                b.change_label,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Names of the entries flagged as significant in the current wave.
pub fn format_significant_changes<S: PreferenceStore>(
    ds: &Dataset,
    kind: ElectionKind,
    ctx: &LocaleContext<S>,
) -> String {
    let locale = ctx.locale();
    let names: Vec<&str> = ds
        .significant_changes(kind)
        .into_iter()
        .filter_map(|id| display_name(ds, kind, id, locale))
        .collect();

    let list = if names.is_empty() { ctx.t("report.none") } else { names.join(", ") };
    format!("{}: {list}\n", ctx.t("report.significant"))
}

fn display_name<'a>(ds: &'a Dataset, kind: ElectionKind, id: &str, locale: Locale) -> Option<&'a str> {
    ds.contenders(kind)
        .iter()
        .chain(ds.other_options(kind))
        .find(|e| e.id == id)
        .map(|e| e.name.get(locale))
}

pub fn format_check_report<S: PreferenceStore>(problems: &[String], ctx: &LocaleContext<S>) -> String {
    if problems.is_empty() {
        return format!("{}\n", ctx.t("check.ok"));
    }
    let mut out = format!("{} ({}):\n", ctx.t("check.problems"), problems.len());
    for p in problems {
        out.push_str(&format!("- {p}\n"));
    }
    out
}

pub fn format_locale_status<S: PreferenceStore>(ctx: &LocaleContext<S>) -> String {
    let locale = ctx.locale();
    format!("{}: {} ({})\n", ctx.t("locale.current"), locale.native_name(), locale.code())
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

//! Chart-ready projections.
//!
//! - horizontal bars for the presidential / parliamentary questions (`ChartBar`)
//! - the three-series country-direction line chart (`DirectionChartPoint`)
//! - localized series descriptors in legend order (`SeriesLegend`)

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::domain::{
    Contender, Dataset, DirectionSeries, ElectionKind, Locale, PeriodId, TimeSeriesDataPoint,
};
use crate::report::change::{Direction, calculate_change, format_change_indicator};

/// One bar of the current-vs-previous comparison chart.
///
/// Known limitation: a missing result, or one with a `null` value, is
/// projected as `0.0`, so "not polled" and "0 %" look the same here. Use
/// `Dataset::result_for` when the distinction matters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBar {
    /// Candidate or party id.
    pub id: String,
    /// Localized name, with `" ↑"` / `" ↓"` appended for significant moves.
    pub name: String,
    pub current: f64,
    pub previous: f64,
    pub change: f64,
    pub direction: Direction,
    pub is_significant: bool,
    /// `"↑ 3.7%"`, or empty.
    pub change_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionChartPoint {
    /// `MM'YYYY`.
    pub period: String,
    pub wrong_direction: f64,
    pub right_direction: f64,
    pub hard_to_say: f64,
}

impl DirectionChartPoint {
    pub fn value(&self, kind: SeriesKind) -> f64 {
        match kind {
            SeriesKind::RightDirection => self.right_direction,
            SeriesKind::WrongDirection => self.wrong_direction,
            SeriesKind::HardToSay => self.hard_to_say,
        }
    }
}

impl From<&TimeSeriesDataPoint> for DirectionChartPoint {
    fn from(p: &TimeSeriesDataPoint) -> Self {
        Self {
            period: p.period.clone(),
            wrong_direction: p.wrong_direction,
            right_direction: p.right_direction,
            hard_to_say: p.hard_to_say,
        }
    }
}

/// Which of the three country-direction answers a series plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesKind {
    RightDirection,
    WrongDirection,
    HardToSay,
}

/// A localized line-chart series descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesLegend<'a> {
    pub kind: SeriesKind,
    /// Dataset-supplied id; display only.
    pub id: &'a str,
    pub label: &'a str,
    /// Hex color.
    pub color: &'a str,
}

pub fn transform_presidential_for_chart(dataset: &Dataset, locale: Locale) -> Vec<ChartBar> {
    transform_for_chart(dataset, ElectionKind::Presidential, locale)
}

pub fn transform_parliamentary_for_chart(dataset: &Dataset, locale: Locale) -> Vec<ChartBar> {
    transform_for_chart(dataset, ElectionKind::Parliamentary, locale)
}

/// Bars for every candidate or party, sorted by current value, highest first.
pub fn transform_for_chart(dataset: &Dataset, kind: ElectionKind, locale: Locale) -> Vec<ChartBar> {
    let current = dataset.current_survey_id();
    let previous = dataset.previous_survey_id();

    let mut bars: Vec<ChartBar> = dataset
        .contenders(kind)
        .iter()
        .map(|entry| project_entry(entry, current, previous, locale))
        .collect();

    // `sort_by` is stable, so equal values keep dataset order.
    bars.sort_by(|a, b| b.current.partial_cmp(&a.current).unwrap_or(Ordering::Equal));
    bars
}

fn project_entry(entry: &Contender, current: PeriodId, previous: PeriodId, locale: Locale) -> ChartBar {
    let current_result = entry.results.get(current);
    let current_value = value_or_zero(entry, current);
    let previous_value = value_or_zero(entry, previous);
    let is_significant = current_result.is_some_and(|r| r.is_significant);

    let change = calculate_change(current_value, previous_value);

    let base_name = entry.name.get(locale);
    let name = if is_significant && change.direction != Direction::Neutral {
        format!("{base_name} {}", change.direction.arrow())
    } else {
        base_name.to_string()
    };

    ChartBar {
        id: entry.id.clone(),
        name,
        current: current_value,
        previous: previous_value,
        change: change.change,
        direction: change.direction,
        is_significant,
        change_label: format_change_indicator(change.change, change.direction, is_significant),
    }
}

fn value_or_zero(entry: &Contender, period: PeriodId) -> f64 {
    match entry.results.get(period).and_then(|r| r.value) {
        Some(v) => v,
        None => {
            debug!(id = %entry.id, %period, "no result value; projecting as 0");
            0.0
        }
    }
}

pub fn transform_country_direction_for_chart(dataset: &Dataset) -> Vec<DirectionChartPoint> {
    dataset
        .country_direction()
        .time_series
        .iter()
        .map(DirectionChartPoint::from)
        .collect()
}

/// Series descriptors in legend order: right direction, wrong direction,
/// hard to say.
pub fn direction_series(dataset: &Dataset, locale: Locale) -> [SeriesLegend<'_>; 3] {
    let series = dataset.country_direction_series();
    [
        legend(SeriesKind::RightDirection, &series.right_direction, locale),
        legend(SeriesKind::WrongDirection, &series.wrong_direction, locale),
        legend(SeriesKind::HardToSay, &series.hard_to_say, locale),
    ]
}

fn legend(kind: SeriesKind, series: &DirectionSeries, locale: Locale) -> SeriesLegend<'_> {
    SeriesLegend {
        kind,
        id: &series.id,
        label: series.label.get(locale),
        color: &series.color,
    }
}

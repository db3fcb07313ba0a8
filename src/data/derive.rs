//! Derived views over the dataset: time-series windows, top-N rankings,
//! significance filters, and vote-share sums.

use std::cmp::Ordering;

use crate::domain::{Contender, Dataset, ElectionKind, OtherOption, PeriodId, TimeSeriesDataPoint};

/// Other options whose id starts with this prefix are "undecided" answers
/// and are left out of the valid-vote share. A prefix rather than an exact
/// `"undecided"` match, so per-election ids like `undecided-parliament`
/// are excluded too.
const UNDECIDED_PREFIX: &str = "undecided";

impl Dataset {
    /// The last `count` points of the country-direction series.
    pub fn recent_time_series(&self, count: usize) -> &[TimeSeriesDataPoint] {
        let series = &self.country_direction.time_series;
        &series[series.len().saturating_sub(count)..]
    }

    /// Points whose month falls in `start..=end`.
    pub fn time_series_range(&self, start: PeriodId, end: PeriodId) -> Vec<&TimeSeriesDataPoint> {
        self.country_direction
            .time_series
            .iter()
            .filter(|p| p.month >= start && p.month <= end)
            .collect()
    }

    pub fn latest_time_series_point(&self) -> Option<&TimeSeriesDataPoint> {
        self.country_direction.time_series.last()
    }

    pub fn time_series_by_year(&self, year: u16) -> Vec<&TimeSeriesDataPoint> {
        self.country_direction
            .time_series
            .iter()
            .filter(|p| p.month.year() == year)
            .collect()
    }

    /// Up to `n` candidates with a current value, highest first.
    pub fn top_presidential_candidates(&self, n: usize) -> Vec<&Contender> {
        top_by_current(&self.presidential.candidates, self.meta.current_survey, n)
    }

    /// Up to `n` parties with a current value, highest first.
    pub fn top_parliamentary_parties(&self, n: usize) -> Vec<&Contender> {
        top_by_current(&self.parliamentary.parties, self.meta.current_survey, n)
    }

    /// Ids of named entries, then other options, whose current result is
    /// flagged significant.
    pub fn significant_changes(&self, kind: ElectionKind) -> Vec<&str> {
        let current = self.meta.current_survey;
        self.contenders(kind)
            .iter()
            .chain(self.other_options(kind))
            .filter(|e| e.results.get(current).is_some_and(|r| r.is_significant))
            .map(|e| e.id.as_str())
            .collect()
    }
}

fn top_by_current(entries: &[Contender], current: PeriodId, n: usize) -> Vec<&Contender> {
    let mut with_value: Vec<(&Contender, f64)> = entries
        .iter()
        .filter_map(|e| e.results.get(current).and_then(|r| r.value).map(|v| (e, v)))
        .collect();
    with_value.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    with_value.into_iter().take(n).map(|(e, _)| e).collect()
}

/// Sort entries by their value in `period`; entries without one sort as -1.
pub fn sort_by_value(entries: &[Contender], period: PeriodId, descending: bool) -> Vec<&Contender> {
    let key = |e: &Contender| e.results.get(period).and_then(|r| r.value).unwrap_or(-1.0);
    let mut sorted: Vec<&Contender> = entries.iter().collect();
    sorted.sort_by(|a, b| {
        let ord = key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal);
        if descending { ord.reverse() } else { ord }
    });
    sorted
}

/// Sum of named-entry shares plus other-option shares for `period`,
/// excluding undecided answers. Missing values count as zero.
pub fn valid_vote_share(entries: &[Contender], other_options: &[OtherOption], period: PeriodId) -> f64 {
    let value = |e: &Contender| e.results.get(period).and_then(|r| r.value).unwrap_or(0.0);
    let named: f64 = entries.iter().map(value).sum();
    let other: f64 = other_options
        .iter()
        .filter(|o| !o.id.starts_with(UNDECIDED_PREFIX))
        .map(value)
        .sum();
    named + other
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture;

    fn period(s: &str) -> PeriodId {
        s.parse().unwrap()
    }

    fn ids<'a>(entries: &[&'a Contender]) -> Vec<&'a str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn recent_returns_last_points() {
        let ds = fixture::dataset();
        let recent = ds.recent_time_series(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].month, period("2025-11"));
        assert_eq!(recent[1].month, period("2025-12"));
        assert_eq!(ds.recent_time_series(50).len(), 5);
        assert!(ds.recent_time_series(0).is_empty());
    }

    #[test]
    fn range_is_inclusive() {
        let ds = fixture::dataset();
        let window = ds.time_series_range(period("2024-12"), period("2025-11"));
        let months: Vec<String> = window.iter().map(|p| p.month.to_string()).collect();
        assert_eq!(months, ["2024-12", "2025-01", "2025-11"]);
        assert!(ds.time_series_range(period("2025-12"), period("2024-01")).is_empty());
    }

    #[test]
    fn latest_and_by_year() {
        let ds = fixture::dataset();
        assert_eq!(ds.latest_time_series_point().unwrap().period, "12'2025");
        assert_eq!(ds.time_series_by_year(2024).len(), 2);
        assert_eq!(ds.time_series_by_year(2025).len(), 3);
        assert!(ds.time_series_by_year(2019).is_empty());
    }

    #[test]
    fn top_n_skips_entries_without_current_value() {
        let ds = fixture::dataset();
        assert_eq!(ids(&ds.top_presidential_candidates(10)), ["beta", "alpha", "gamma"]);
        assert_eq!(ids(&ds.top_presidential_candidates(1)), ["beta"]);
        assert_eq!(ids(&ds.top_parliamentary_parties(2)), ["p-two", "p-one"]);
    }

    #[test]
    fn significant_ids_include_other_options() {
        let ds = fixture::dataset();
        assert_eq!(
            ds.significant_changes(ElectionKind::Presidential),
            ["alpha", "gamma", "undecided"]
        );
        assert_eq!(ds.significant_changes(ElectionKind::Parliamentary), ["p-one", "p-two"]);
    }

    #[test]
    fn sort_by_value_puts_missing_last() {
        let ds = fixture::dataset();
        let desc = sort_by_value(ds.presidential_candidates(), period("2025-12"), true);
        assert_eq!(ids(&desc), ["beta", "alpha", "gamma", "delta"]);
        let asc = sort_by_value(ds.presidential_candidates(), period("2025-12"), false);
        assert_eq!(ids(&asc), ["delta", "gamma", "alpha", "beta"]);
    }

    #[test]
    fn valid_vote_share_excludes_undecided() {
        let ds = fixture::dataset();
        let share = valid_vote_share(
            ds.presidential_candidates(),
            ds.presidential_other_options(),
            period("2025-12"),
        );
        // 23.9 + 24.0 + 6.5 + wont-vote 6.0
        assert!((share - 60.4).abs() < 1e-9, "{share}");

        let parl = valid_vote_share(
            ds.parliamentary_parties(),
            ds.parliamentary_other_options(),
            period("2025-12"),
        );
        assert!((parl - 29.95).abs() < 1e-9, "{parl}");
    }
}

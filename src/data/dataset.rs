//! Dataset loading and structural validation.
//!
//! The dataset is parsed once at start-up, validated, and then shared
//! read-only. Structural problems (duplicate ids, incomplete month/label
//! tables, results keyed by unregistered periods) reject the document
//! outright. The `currentSurvey` / `previousSurvey` pointers are left to the
//! accessors, which fail loudly when a pointer dangles; `consistency_report`
//! lists those problems up front for the `check` command.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::domain::{Contender, Dataset, MonthKey, UiLabel};
use crate::error::DataError;

/// The dataset shipped with the crate.
pub const EMBEDDED_DATASET: &str = include_str!("../../data/uelectoral-data.json");

impl Dataset {
    /// Parse and validate the embedded dataset.
    pub fn embedded() -> Result<Self, DataError> {
        Self::from_json_str(EMBEDDED_DATASET, "embedded dataset")
    }

    /// Parse and validate a dataset file.
    pub fn from_path(path: &Path) -> Result<Self, DataError> {
        let text = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text, &format!("dataset '{}'", path.display()))
    }

    /// Load from `path` if given, else the embedded copy.
    pub fn load(path: Option<&Path>) -> Result<Self, DataError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    /// Parse a JSON document; `what` names the source in error messages.
    pub fn from_json_str(json: &str, what: &str) -> Result<Self, DataError> {
        let dataset: Dataset = serde_json::from_str(json).map_err(|source| DataError::Parse {
            what: what.to_string(),
            source,
        })?;
        dataset.validate()?;

        info!(
            source = what,
            version = %dataset.meta.version,
            surveys = dataset.surveys.len(),
            time_series = dataset.country_direction.time_series.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    fn validate(&self) -> Result<(), DataError> {
        match self.structural_problems().into_iter().next() {
            Some(problem) => Err(DataError::InvalidDataset(problem)),
            None => Ok(()),
        }
    }

    fn structural_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for (key, survey) in &self.surveys {
            if *key != survey.id {
                problems.push(format!("survey registered under {key} has id {}", survey.id));
            }
        }

        for month in MonthKey::all() {
            if !self.ui.months.contains_key(&month) {
                problems.push(format!("ui.months is missing month {month}"));
            }
        }

        for label in UiLabel::ALL {
            if !self.ui.labels.contains_key(label.key()) {
                problems.push(format!("ui.labels is missing '{}'", label.key()));
            }
        }

        let presidential = self
            .presidential
            .candidates
            .iter()
            .chain(&self.presidential.other_options);
        problems.extend(duplicate_ids("presidential", presidential.clone()));
        problems.extend(self.unregistered_periods("presidential", presidential));

        let parliamentary = self
            .parliamentary
            .parties
            .iter()
            .chain(&self.parliamentary.other_options);
        problems.extend(duplicate_ids("parliamentary", parliamentary.clone()));
        problems.extend(self.unregistered_periods("parliamentary", parliamentary));

        problems
    }

    fn unregistered_periods<'a>(
        &self,
        section: &str,
        entries: impl Iterator<Item = &'a Contender>,
    ) -> Vec<String> {
        let mut out = Vec::new();
        for entry in entries {
            for period in entry.results.periods() {
                if !self.surveys.contains_key(&period) {
                    out.push(format!(
                        "{section} entry '{}' has results for unregistered period {period}",
                        entry.id
                    ));
                }
            }
        }
        out
    }

    /// Every consistency problem in the document, including dangling survey
    /// pointers and time-series irregularities that do not block loading.
    ///
    /// An empty list means the dataset is fully consistent.
    pub fn consistency_report(&self) -> Vec<String> {
        let mut problems = self.structural_problems();

        if !self.surveys.contains_key(&self.meta.current_survey) {
            problems.push(format!(
                "meta.currentSurvey {} has no survey record",
                self.meta.current_survey
            ));
        }
        if !self.surveys.contains_key(&self.meta.previous_survey) {
            problems.push(format!(
                "meta.previousSurvey {} has no survey record",
                self.meta.previous_survey
            ));
        }
        if self.meta.previous_survey >= self.meta.current_survey {
            problems.push(format!(
                "meta.previousSurvey {} is not before meta.currentSurvey {}",
                self.meta.previous_survey, self.meta.current_survey
            ));
        }

        let series = &self.country_direction.time_series;
        for pair in series.windows(2) {
            if pair[1].month <= pair[0].month {
                problems.push(format!(
                    "countryDirection.timeSeries is out of order at {} -> {}",
                    pair[0].month, pair[1].month
                ));
            }
        }
        for point in series {
            if point.period != point.month.chart_form() {
                problems.push(format!(
                    "countryDirection.timeSeries point {} has display period '{}'",
                    point.month, point.period
                ));
            }
        }

        problems
    }
}

fn duplicate_ids<'a>(section: &str, entries: impl Iterator<Item = &'a Contender>) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .filter(|e| !seen.insert(e.id.as_str()))
        .map(|e| format!("{section} id '{}' is not unique", e.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture;
    use serde_json::json;

    fn load(value: serde_json::Value) -> Result<Dataset, DataError> {
        Dataset::from_json_str(&value.to_string(), "test")
    }

    #[test]
    fn embedded_dataset_loads_and_is_consistent() {
        let ds = Dataset::embedded().unwrap();
        assert!(ds.surveys.len() >= 2);
        assert!(!ds.presidential.candidates.is_empty());
        assert!(!ds.parliamentary.parties.is_empty());
        assert_eq!(ds.consistency_report(), Vec::<String>::new());
    }

    #[test]
    fn fixture_is_consistent() {
        assert!(fixture::dataset().consistency_report().is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut v = fixture::json();
        v["presidential"]["otherOptions"][0]["id"] = json!("alpha");
        let err = load(v).unwrap_err();
        assert!(matches!(err, DataError::InvalidDataset(ref m) if m.contains("'alpha'")), "{err}");
    }

    #[test]
    fn same_id_in_different_elections_is_allowed() {
        let mut v = fixture::json();
        v["parliamentary"]["parties"][0]["id"] = json!("alpha");
        assert!(load(v).is_ok());
    }

    #[test]
    fn missing_month_is_rejected() {
        let mut v = fixture::json();
        v["ui"]["months"].as_object_mut().unwrap().remove("07");
        let err = load(v).unwrap_err();
        assert!(err.to_string().contains("month 07"), "{err}");
    }

    #[test]
    fn missing_label_is_rejected() {
        let mut v = fixture::json();
        v["ui"]["labels"].as_object_mut().unwrap().remove("legend");
        assert!(matches!(load(v), Err(DataError::InvalidDataset(_))));
    }

    #[test]
    fn malformed_period_key_fails_to_parse() {
        let mut v = fixture::json();
        v["presidential"]["candidates"][0]["results"]["2025-13"] = json!({ "value": 1.0, "isSignificant": false });
        assert!(matches!(load(v), Err(DataError::Parse { .. })));
    }

    #[test]
    fn results_for_unregistered_period_are_rejected() {
        let mut v = fixture::json();
        v["parliamentary"]["parties"][1]["results"]["2024-01"] = json!({ "value": 1.0, "isSignificant": false });
        let err = load(v).unwrap_err();
        assert!(err.to_string().contains("unregistered period 2024-01"), "{err}");
    }

    #[test]
    fn dangling_current_survey_loads_but_is_reported() {
        let mut v = fixture::json();
        v["meta"]["currentSurvey"] = json!("2026-01");
        let ds = load(v).unwrap();
        let report = ds.consistency_report();
        assert!(report.iter().any(|p| p.contains("currentSurvey 2026-01")), "{report:?}");
    }

    #[test]
    fn time_series_irregularities_are_reported() {
        let mut v = fixture::json();
        v["countryDirection"]["timeSeries"][1]["period"] = json!("1'2024");
        v["countryDirection"]["timeSeries"].as_array_mut().unwrap().swap(3, 4);
        let report = load(v).unwrap().consistency_report();
        assert_eq!(report.len(), 2, "{report:?}");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Dataset::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}

//! Export chart projections to JSON.
//!
//! The document carries enough context (question, locale, both survey
//! periods) to be read without the dataset.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::{Dataset, ElectionKind, Locale, PeriodId};
use crate::error::{AppError, EXIT_USAGE};
use crate::report::chart::ChartBar;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionExport<'a> {
    pub tool: &'static str,
    pub dataset_version: &'a str,
    pub election: ElectionKind,
    pub locale: Locale,
    pub question: &'a str,
    pub current_survey: PeriodId,
    pub previous_survey: PeriodId,
    pub bars: &'a [ChartBar],
}

impl<'a> ProjectionExport<'a> {
    pub fn new(ds: &'a Dataset, kind: ElectionKind, locale: Locale, bars: &'a [ChartBar]) -> Self {
        Self {
            tool: "uel",
            dataset_version: &ds.metadata().version,
            election: kind,
            locale,
            question: ds.election_question(kind, locale),
            current_survey: ds.current_survey_id(),
            previous_survey: ds.previous_survey_id(),
            bars,
        }
    }
}

/// Write a projection JSON file.
pub fn write_projection_json(path: &Path, export: &ProjectionExport<'_>) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, export)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write export JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture;
    use crate::report::chart::transform_parliamentary_for_chart;

    #[test]
    fn export_writes_projection_document() {
        let ds = fixture::dataset();
        let bars = transform_parliamentary_for_chart(&ds, Locale::En);
        let export = ProjectionExport::new(&ds, ElectionKind::Parliamentary, Locale::En, &bars);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parliament.json");
        write_projection_json(&path, &export).unwrap();

        let v: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(v["tool"], "uel");
        assert_eq!(v["election"], "parliamentary");
        assert_eq!(v["locale"], "en");
        assert_eq!(v["currentSurvey"], "2025-12");
        assert_eq!(v["previousSurvey"], "2025-11");
        assert_eq!(v["bars"].as_array().unwrap().len(), 3);
        assert_eq!(v["bars"][0]["id"], "p-two");
    }

    #[test]
    fn export_to_missing_directory_fails_with_usage_code() {
        let ds = fixture::dataset();
        let export = ProjectionExport::new(&ds, ElectionKind::Presidential, Locale::Uk, &[]);
        let err = write_projection_json(Path::new("/no/such/dir/out.json"), &export).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}

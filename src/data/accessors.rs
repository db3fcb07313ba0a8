//! Read-only getters over a loaded `Dataset`.
//!
//! Lookups of things that are expected to be missing (an unknown candidate
//! id, a survey that was never run) return `Option`. Lookups that can only
//! fail if the dataset itself is inconsistent (the designated current survey
//! has no record, a month key outside `01`..`12`) return `DataError`.

use crate::domain::{
    BilingualText, Candidate, ColorScheme, Commissioner, Contender, CountryDirection, Dataset,
    DirectionSeriesConfig, DirectionValues, ElectionKind, ElectionResult, ElectionResults, Locale,
    Meta, Methodology, MonthKey, OtherOption, Parliamentary, Party, PeriodId, Presidential, Survey,
    Theme, ThemeColorKey, Ui, UiLabel,
};
use crate::error::DataError;

/// Navigation labels resolved for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedNavigation<'a> {
    pub home: &'a str,
    pub methodology: &'a str,
    pub direction: &'a str,
    pub presidential: &'a str,
    pub parliamentary: &'a str,
}

impl Dataset {
    // -- meta ---------------------------------------------------------------

    pub fn metadata(&self) -> &Meta {
        &self.meta
    }

    pub fn current_survey_id(&self) -> PeriodId {
        self.meta.current_survey
    }

    pub fn previous_survey_id(&self) -> PeriodId {
        self.meta.previous_survey
    }

    /// The survey designated as current by the metadata.
    pub fn current_survey(&self) -> Result<&Survey, DataError> {
        let period = self.meta.current_survey;
        self.surveys
            .get(&period)
            .ok_or(DataError::SurveyNotFound { role: "Current", period })
    }

    /// The survey designated as previous by the metadata.
    pub fn previous_survey(&self) -> Result<&Survey, DataError> {
        let period = self.meta.previous_survey;
        self.surveys
            .get(&period)
            .ok_or(DataError::SurveyNotFound { role: "Previous", period })
    }

    pub fn survey_by_id(&self, id: PeriodId) -> Option<&Survey> {
        self.surveys.get(&id)
    }

    pub fn project_title(&self, locale: Locale) -> &str {
        self.meta.project.name.get(locale)
    }

    pub fn project_full_title(&self, locale: Locale) -> &str {
        self.meta.project.full_title.get(locale)
    }

    pub fn prepared_by_text(&self, locale: Locale) -> &str {
        self.meta.prepared_by.get(locale)
    }

    pub fn commissioner(&self) -> &Commissioner {
        &self.meta.commissioner
    }

    // -- methodology --------------------------------------------------------

    pub fn methodology(&self) -> &Methodology {
        &self.methodology
    }

    pub fn sample_size(&self) -> u32 {
        self.methodology.sample.size
    }

    /// Margin of error in percentage points.
    pub fn margin_of_error(&self) -> f64 {
        self.methodology.margin_of_error.value
    }

    pub fn confidence_level(&self) -> f64 {
        self.methodology.margin_of_error.confidence_level
    }

    // -- country direction --------------------------------------------------

    pub fn country_direction(&self) -> &CountryDirection {
        &self.country_direction
    }

    pub fn country_direction_series(&self) -> &DirectionSeriesConfig {
        &self.country_direction.series
    }

    pub fn current_direction_values(&self) -> DirectionValues {
        self.country_direction.current_values
    }

    pub fn country_direction_question(&self, locale: Locale) -> &str {
        self.country_direction.question.get(locale)
    }

    // -- elections ----------------------------------------------------------

    pub fn presidential_data(&self) -> &Presidential {
        &self.presidential
    }

    pub fn presidential_candidates(&self) -> &[Candidate] {
        &self.presidential.candidates
    }

    pub fn presidential_other_options(&self) -> &[OtherOption] {
        &self.presidential.other_options
    }

    pub fn presidential_question(&self, locale: Locale) -> &str {
        self.presidential.question.get(locale)
    }

    pub fn candidate_by_id(&self, id: &str) -> Option<&Candidate> {
        self.presidential.candidates.iter().find(|c| c.id == id)
    }

    pub fn parliamentary_data(&self) -> &Parliamentary {
        &self.parliamentary
    }

    pub fn parliamentary_parties(&self) -> &[Party] {
        &self.parliamentary.parties
    }

    pub fn parliamentary_other_options(&self) -> &[OtherOption] {
        &self.parliamentary.other_options
    }

    pub fn parliamentary_question(&self, locale: Locale) -> &str {
        self.parliamentary.question.get(locale)
    }

    pub fn party_by_id(&self, id: &str) -> Option<&Party> {
        self.parliamentary.parties.iter().find(|p| p.id == id)
    }

    /// Candidates or parties, depending on `kind`.
    pub fn contenders(&self, kind: ElectionKind) -> &[Contender] {
        match kind {
            ElectionKind::Presidential => &self.presidential.candidates,
            ElectionKind::Parliamentary => &self.parliamentary.parties,
        }
    }

    pub fn other_options(&self, kind: ElectionKind) -> &[OtherOption] {
        match kind {
            ElectionKind::Presidential => &self.presidential.other_options,
            ElectionKind::Parliamentary => &self.parliamentary.other_options,
        }
    }

    pub fn election_title(&self, kind: ElectionKind, locale: Locale) -> &str {
        match kind {
            ElectionKind::Presidential => self.presidential.title.get(locale),
            ElectionKind::Parliamentary => self.parliamentary.title.get(locale),
        }
    }

    pub fn election_question(&self, kind: ElectionKind, locale: Locale) -> &str {
        match kind {
            ElectionKind::Presidential => self.presidential_question(locale),
            ElectionKind::Parliamentary => self.parliamentary_question(locale),
        }
    }

    /// The entry for `period`, distinguishing an unregistered period (error)
    /// from a registered period the entity simply has no result for (`None`).
    pub fn result_for<'a>(
        &self,
        results: &'a ElectionResults,
        period: PeriodId,
    ) -> Result<Option<&'a ElectionResult>, DataError> {
        if !self.surveys.contains_key(&period) {
            return Err(DataError::UnknownPeriod(period));
        }
        Ok(results.get(period))
    }

    // -- ui / theme ---------------------------------------------------------

    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn theme_color(&self, scheme: ColorScheme, key: ThemeColorKey) -> &str {
        match scheme {
            ColorScheme::Light => self.theme.colors.light.get(key),
            ColorScheme::Dark => self.theme.colors.dark.get(key),
        }
    }

    pub fn navigation_labels(&self, locale: Locale) -> LocalizedNavigation<'_> {
        let nav = &self.ui.navigation;
        LocalizedNavigation {
            home: nav.home.get(locale),
            methodology: nav.methodology.get(locale),
            direction: nav.direction.get(locale),
            presidential: nav.presidential.get(locale),
            parliamentary: nav.parliamentary.get(locale),
        }
    }

    pub fn ui_label(&self, label: UiLabel, locale: Locale) -> Result<&str, DataError> {
        self.ui
            .labels
            .get(label.key())
            .map(|text| text.get(locale))
            .ok_or_else(|| DataError::InvalidDataset(format!("ui.labels is missing '{}'", label.key())))
    }

    /// Full month name for a two-digit key such as `"03"`.
    pub fn month_name(&self, month: &str, locale: Locale) -> Result<&str, DataError> {
        let key: MonthKey = month.parse().map_err(|_| DataError::InvalidMonth(month.to_string()))?;
        self.month_name_for(key, locale)
    }

    fn month_name_for(&self, key: MonthKey, locale: Locale) -> Result<&str, DataError> {
        self.ui
            .months
            .get(&key)
            .map(|text| text.get(locale))
            .ok_or_else(|| DataError::InvalidMonth(key.to_string()))
    }

    /// `"2025-12"` -> `"Грудень 2025"` using the dataset's own month names.
    /// Segments after the month (e.g. a day) are ignored.
    pub fn format_period(&self, period: &str, locale: Locale) -> Result<String, DataError> {
        let mut parts = period.split('-');
        let (year, month) = match (parts.next(), parts.next()) {
            (Some(y), Some(m)) if !y.is_empty() && !m.is_empty() => (y, m),
            _ => return Err(DataError::InvalidPeriod(period.to_string())),
        };
        let name = self.month_name(month, locale)?;
        Ok(format!("{name} {year}"))
    }

    pub fn current_display_date(&self, locale: Locale) -> Result<&str, DataError> {
        Ok(self.current_survey()?.display_date.get(locale))
    }

    pub fn previous_display_date(&self, locale: Locale) -> Result<&str, DataError> {
        Ok(self.previous_survey()?.display_date.get(locale))
    }

    pub fn current_month_name(&self, locale: Locale) -> Result<&str, DataError> {
        Ok(self.current_survey()?.month_name.get(locale))
    }
}

/// Resolve bilingual text for a locale.
pub fn localized(text: &BilingualText, locale: Locale) -> &str {
    text.get(locale)
}

/// True when `result` exists and carries a value.
pub fn has_valid_result(result: Option<&ElectionResult>) -> bool {
    result.is_some_and(ElectionResult::has_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture;
    use serde_json::json;

    fn period(s: &str) -> PeriodId {
        s.parse().unwrap()
    }

    #[test]
    fn current_and_previous_surveys_resolve() {
        let ds = fixture::dataset();
        assert_eq!(ds.current_survey().unwrap().id, period("2025-12"));
        assert_eq!(ds.previous_survey().unwrap().id, period("2025-11"));
        assert_eq!(ds.current_display_date(Locale::En).unwrap(), "December 26");
        assert_eq!(ds.previous_display_date(Locale::Uk).unwrap(), "27 Листопад");
        assert_eq!(ds.current_month_name(Locale::Uk).unwrap(), "Грудень");
    }

    #[test]
    fn dangling_survey_pointer_is_fatal() {
        let mut v = fixture::json();
        v["meta"]["previousSurvey"] = json!("2025-10");
        let ds = Dataset::from_json_str(&v.to_string(), "test").unwrap();
        let err = ds.previous_survey().unwrap_err();
        assert_eq!(err.to_string(), "Previous survey data not found for period: 2025-10");
        assert!(ds.current_survey().is_ok());
    }

    #[test]
    fn lookups_by_id_are_optional() {
        let ds = fixture::dataset();
        assert_eq!(ds.candidate_by_id("beta").unwrap().name.get(Locale::En), "Beta");
        assert!(ds.candidate_by_id("undecided").is_none());
        assert_eq!(ds.party_by_id("p-two").unwrap().name.get(Locale::Uk), "Друга");
        assert!(ds.party_by_id("alpha").is_none());
        assert!(ds.survey_by_id(period("2025-11")).is_some());
        assert!(ds.survey_by_id(period("2020-01")).is_none());
    }

    #[test]
    fn bilingual_text_resolves_verbatim() {
        let ds = fixture::dataset();
        assert_eq!(localized(&ds.meta.project.name, Locale::Uk), "Настрої");
        assert_eq!(localized(&ds.meta.project.name, Locale::En), "Sentiment");
        assert_eq!(ds.project_full_title(Locale::En), "Sentiment of Ukrainians");
        assert_eq!(ds.prepared_by_text(Locale::Uk), "Підготовлено");
    }

    #[test]
    fn month_names_require_two_digit_keys() {
        let ds = fixture::dataset();
        assert_eq!(ds.month_name("03", Locale::Uk).unwrap(), "Березень");
        assert_eq!(ds.month_name("12", Locale::En).unwrap(), "December");
        for bad in ["00", "13", "3", "xx"] {
            assert!(
                matches!(ds.month_name(bad, Locale::Uk), Err(DataError::InvalidMonth(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn format_period_uses_dataset_month_names() {
        let ds = fixture::dataset();
        assert_eq!(ds.format_period("2025-12", Locale::Uk).unwrap(), "Грудень 2025");
        assert_eq!(ds.format_period("2022-03", Locale::En).unwrap(), "March 2022");
        assert!(matches!(ds.format_period("202512", Locale::Uk), Err(DataError::InvalidPeriod(_))));
        assert!(matches!(ds.format_period("2025-13", Locale::Uk), Err(DataError::InvalidMonth(_))));
        assert_eq!(ds.format_period("2025-12-01", Locale::Uk).unwrap(), "Грудень 2025");
    }

    #[test]
    fn ui_labels_and_navigation() {
        let ds = fixture::dataset();
        assert_eq!(ds.ui_label(UiLabel::ShowAll, Locale::Uk).unwrap(), "мітка showAll");
        assert_eq!(ds.ui_label(UiLabel::System, Locale::En).unwrap(), "system");
        let nav = ds.navigation_labels(Locale::En);
        assert_eq!(nav.home, "Home");
        assert_eq!(nav.parliamentary, "Parliament");
    }

    #[test]
    fn methodology_numbers() {
        let ds = fixture::dataset();
        assert_eq!(ds.sample_size(), 1000);
        assert!((ds.margin_of_error() - 3.1).abs() < 1e-12);
        assert!((ds.confidence_level() - 0.95).abs() < 1e-12);
        assert!(ds.methodology().method.details.is_some());
        assert!(ds.methodology().target_audience.details.is_none());
    }

    #[test]
    fn result_lookup_separates_unknown_period_from_missing_entry() {
        let ds = fixture::dataset();
        let delta = ds.candidate_by_id("delta").unwrap();

        assert!(ds.result_for(&delta.results, period("2025-12")).unwrap().is_none());
        let nov = ds.result_for(&delta.results, period("2025-11")).unwrap();
        assert!(nov.is_some());
        assert!(!has_valid_result(nov));

        let err = ds.result_for(&delta.results, period("2024-01")).unwrap_err();
        assert!(matches!(err, DataError::UnknownPeriod(p) if p == period("2024-01")));

        let alpha = ds.candidate_by_id("alpha").unwrap();
        assert!(has_valid_result(ds.result_for(&alpha.results, period("2025-12")).unwrap()));
    }

    #[test]
    fn theme_colors_by_scheme() {
        let ds = fixture::dataset();
        assert_eq!(ds.theme_color(ColorScheme::Light, ThemeColorKey::Background), "#FFFFFF");
        assert_eq!(ds.theme_color(ColorScheme::Dark, ThemeColorKey::Background), "#000000");
        assert_eq!(ds.theme_color(ColorScheme::Dark, ThemeColorKey::ChartNeutral), "#A8A8A8");
    }

    #[test]
    fn election_helpers_by_kind() {
        let ds = fixture::dataset();
        assert_eq!(ds.contenders(ElectionKind::Presidential).len(), 4);
        assert_eq!(ds.contenders(ElectionKind::Parliamentary).len(), 3);
        assert_eq!(ds.other_options(ElectionKind::Parliamentary)[0].id, "undecided-parliament");
        assert_eq!(ds.election_question(ElectionKind::Presidential, Locale::En), "Whom?");
        assert_eq!(ds.election_title(ElectionKind::Parliamentary, Locale::Uk), "Парламент");
    }
}

//! Shared domain types.
//!
//! These mirror the JSON dataset one-to-one so the whole document can be
//! deserialized with serde, then validated once (see `data::dataset`).
//!
//! A few identifiers are newtypes rather than plain strings:
//!
//! - `PeriodId` (`YYYY-MM`) keys every period-indexed mapping
//! - `MonthKey` (`"01"`..=`"12"`) keys the month-name table
//! - `Locale` is a closed enum, so unsupported language codes cannot be built

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A supported UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Ukrainian (the default).
    #[default]
    Uk,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Uk, Locale::En];

    /// Language code as stored in the dataset and the preference file.
    pub fn code(self) -> &'static str {
        match self {
            Locale::Uk => "uk",
            Locale::En => "en",
        }
    }

    /// Endonym shown in language selectors.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::Uk => "Українська",
            Locale::En => "English",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uk" => Ok(Locale::Uk),
            "en" => Ok(Locale::En),
            other => Err(format!("Unsupported locale '{other}'. Expected one of: uk, en.")),
        }
    }
}

/// A user-facing string in both supported languages.
///
/// Both variants are required and non-empty; deserialization rejects blanks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBilingualText")]
pub struct BilingualText {
    uk: String,
    en: String,
}

#[derive(Deserialize)]
struct RawBilingualText {
    uk: String,
    en: String,
}

impl TryFrom<RawBilingualText> for BilingualText {
    type Error = String;

    fn try_from(raw: RawBilingualText) -> Result<Self, Self::Error> {
        BilingualText::new(raw.uk, raw.en)
    }
}

impl BilingualText {
    pub fn new(uk: impl Into<String>, en: impl Into<String>) -> Result<Self, String> {
        let (uk, en) = (uk.into(), en.into());
        if uk.trim().is_empty() {
            return Err(format!("empty Ukrainian text (English: '{en}')"));
        }
        if en.trim().is_empty() {
            return Err(format!("empty English text (Ukrainian: '{uk}')"));
        }
        Ok(Self { uk, en })
    }

    /// The text for `locale`, verbatim.
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Uk => &self.uk,
            Locale::En => &self.en,
        }
    }
}

/// A survey month in canonical `YYYY-MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodId {
    year: u16,
    month: u8,
}

impl PeriodId {
    pub fn new(year: u16, month: u8) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn year(self) -> u16 {
        self.year
    }

    pub fn month(self) -> u8 {
        self.month
    }

    pub fn month_key(self) -> MonthKey {
        MonthKey(self.month)
    }

    /// The `MM'YYYY` form used on chart axes.
    pub fn chart_form(self) -> String {
        format!("{:02}'{:04}", self.month, self.year)
    }
}

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PeriodId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || format!("Invalid period '{s}'. Expected YYYY-MM.");
        let (y, m) = s.split_once('-').ok_or_else(bad)?;
        if y.len() != 4 || m.len() != 2 || !y.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let year = y.parse::<u16>().map_err(|_| bad())?;
        let month = m.parse::<u8>().map_err(|_| bad())?;
        PeriodId::new(year, month).ok_or_else(bad)
    }
}

impl TryFrom<String> for PeriodId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PeriodId> for String {
    fn from(value: PeriodId) -> Self {
        value.to_string()
    }
}

/// Two-digit month key, `"01"` through `"12"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(u8);

impl MonthKey {
    pub fn all() -> impl Iterator<Item = MonthKey> {
        (1..=12).map(MonthKey)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based index into ordered month tables.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = s.parse::<u8>() {
                if (1..=12).contains(&n) {
                    return Ok(MonthKey(n));
                }
            }
        }
        Err(format!("Invalid month number: {s}"))
    }
}

impl TryFrom<String> for MonthKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// Meta
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub id: String,
    pub name: BilingualText,
    pub full_title: BilingualText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub name: String,
    pub short_name: String,
    pub website: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commissioner {
    pub name: BilingualText,
    pub short_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub version: String,
    pub project: ProjectInfo,
    pub source: Source,
    pub commissioner: Commissioner,
    pub prepared_by: BilingualText,
    /// ISO 8601 timestamp, kept as published.
    pub last_updated: String,
    pub current_survey: PeriodId,
    pub previous_survey: PeriodId,
}

// ---------------------------------------------------------------------------
// Methodology
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodologyField {
    pub title: BilingualText,
    pub value: BilingualText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<BilingualText>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleField {
    pub title: BilingualText,
    pub size: u32,
    pub value: BilingualText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginOfErrorField {
    pub title: BilingualText,
    /// Percentage points.
    pub value: f64,
    /// E.g. `0.95`.
    pub confidence_level: f64,
    pub text: BilingualText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Methodology {
    pub method: MethodologyField,
    pub target_audience: MethodologyField,
    pub sample: SampleField,
    pub margin_of_error: MarginOfErrorField,
}

// ---------------------------------------------------------------------------
// Surveys
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// One monthly survey wave.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: PeriodId,
    pub date: NaiveDate,
    pub period: SurveyPeriod,
    pub display_date: BilingualText,
    pub month_name: BilingualText,
    pub short_month: BilingualText,
}

// ---------------------------------------------------------------------------
// Country direction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionSeries {
    pub id: String,
    pub label: BilingualText,
    /// Hex color, e.g. `#C12745`.
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionSeriesConfig {
    pub wrong_direction: DirectionSeries,
    pub right_direction: DirectionSeries,
    pub hard_to_say: DirectionSeries,
}

/// One month of the "where is the country heading" question.
///
/// The three shares are independent survey percentages; they are not
/// required to add up to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesDataPoint {
    /// Display form, `MM'YYYY`.
    pub period: String,
    /// Sort/lookup form.
    pub month: PeriodId,
    pub wrong_direction: f64,
    pub right_direction: f64,
    pub hard_to_say: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionValues {
    pub wrong_direction: f64,
    pub right_direction: f64,
    pub hard_to_say: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDirection {
    pub title: BilingualText,
    pub question: BilingualText,
    pub y_axis_label: BilingualText,
    pub series: DirectionSeriesConfig,
    pub time_series: Vec<TimeSeriesDataPoint>,
    pub current_values: DirectionValues,
}

// ---------------------------------------------------------------------------
// Election results
// ---------------------------------------------------------------------------

/// A poll share for one survey period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionResult {
    /// `None` means the option was not polled in that wave.
    pub value: Option<f64>,
    /// Dataset-supplied flag: significant change versus the previous wave.
    pub is_significant: bool,
}

impl ElectionResult {
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

/// Results keyed by survey period.
///
/// The valid key set is the dataset's survey registry; this is enforced when
/// the dataset is loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElectionResults(BTreeMap<PeriodId, ElectionResult>);

impl ElectionResults {
    pub fn get(&self, period: PeriodId) -> Option<&ElectionResult> {
        self.0.get(&period)
    }

    pub fn periods(&self) -> impl Iterator<Item = PeriodId> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(PeriodId, ElectionResult)> for ElectionResults {
    fn from_iter<I: IntoIterator<Item = (PeriodId, ElectionResult)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Anything that appears on a ballot question: a candidate, a party, or a
/// non-candidate option such as "undecided".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contender {
    /// Kebab-case identifier, unique within its election.
    pub id: String,
    pub name: BilingualText,
    pub results: ElectionResults,
}

pub type Candidate = Contender;
pub type Party = Contender;
pub type OtherOption = Contender;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presidential {
    pub title: BilingualText,
    pub question: BilingualText,
    pub candidates: Vec<Candidate>,
    pub other_options: Vec<OtherOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parliamentary {
    pub title: BilingualText,
    pub question: BilingualText,
    pub parties: Vec<Party>,
    pub other_options: Vec<OtherOption>,
}

/// Which ballot question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ElectionKind {
    Presidential,
    Parliamentary,
}

// ---------------------------------------------------------------------------
// UI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationLabels {
    pub home: BilingualText,
    pub methodology: BilingualText,
    pub direction: BilingualText,
    pub presidential: BilingualText,
    pub parliamentary: BilingualText,
}

/// The closed set of UI label keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum UiLabel {
    ShowAll,
    ShowLess,
    StatisticalNote,
    ThankYou,
    Respondents,
    Legend,
    Download,
    Share,
    Language,
    Theme,
    Light,
    Dark,
    System,
}

impl UiLabel {
    pub const ALL: [UiLabel; 13] = [
        UiLabel::ShowAll,
        UiLabel::ShowLess,
        UiLabel::StatisticalNote,
        UiLabel::ThankYou,
        UiLabel::Respondents,
        UiLabel::Legend,
        UiLabel::Download,
        UiLabel::Share,
        UiLabel::Language,
        UiLabel::Theme,
        UiLabel::Light,
        UiLabel::Dark,
        UiLabel::System,
    ];

    /// Key in the dataset's `ui.labels` object.
    pub fn key(self) -> &'static str {
        match self {
            UiLabel::ShowAll => "showAll",
            UiLabel::ShowLess => "showLess",
            UiLabel::StatisticalNote => "statisticalNote",
            UiLabel::ThankYou => "thankYou",
            UiLabel::Respondents => "respondents",
            UiLabel::Legend => "legend",
            UiLabel::Download => "download",
            UiLabel::Share => "share",
            UiLabel::Language => "language",
            UiLabel::Theme => "theme",
            UiLabel::Light => "light",
            UiLabel::Dark => "dark",
            UiLabel::System => "system",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ui {
    pub navigation: NavigationLabels,
    /// Keyed by `UiLabel::key`; completeness is checked at load.
    pub labels: BTreeMap<String, BilingualText>,
    /// All twelve keys are checked at load.
    pub months: BTreeMap<MonthKey, BilingualText>,
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Hex colors for one color scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub background: String,
    pub background_secondary: String,
    pub foreground: String,
    pub foreground_secondary: String,
    pub primary: String,
    pub accent: String,
    pub border: String,
    pub chart_primary: String,
    pub chart_secondary: String,
    pub chart_neutral: String,
    pub chart_grid: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeColorKey {
    Background,
    BackgroundSecondary,
    Foreground,
    ForegroundSecondary,
    Primary,
    Accent,
    Border,
    ChartPrimary,
    ChartSecondary,
    ChartNeutral,
    ChartGrid,
}

impl ThemeColors {
    pub fn get(&self, key: ThemeColorKey) -> &str {
        match key {
            ThemeColorKey::Background => &self.background,
            ThemeColorKey::BackgroundSecondary => &self.background_secondary,
            ThemeColorKey::Foreground => &self.foreground,
            ThemeColorKey::ForegroundSecondary => &self.foreground_secondary,
            ThemeColorKey::Primary => &self.primary,
            ThemeColorKey::Accent => &self.accent,
            ThemeColorKey::Border => &self.border,
            ThemeColorKey::ChartPrimary => &self.chart_primary,
            ThemeColorKey::ChartSecondary => &self.chart_secondary,
            ThemeColorKey::ChartNeutral => &self.chart_neutral,
            ThemeColorKey::ChartGrid => &self.chart_grid,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeColorModes {
    pub light: ThemeColors,
    pub dark: ThemeColors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeGradients {
    /// CSS gradient.
    pub hero_light: String,
    pub hero_dark: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub colors: ThemeColorModes,
    pub gradients: ThemeGradients,
}

/// A concrete color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorScheme {
    Light,
    Dark,
}

/// User-selectable theme setting; `System` follows the host preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub fn resolve(self, host_prefers_dark: bool) -> ColorScheme {
        match self {
            ThemeMode::Light => ColorScheme::Light,
            ThemeMode::Dark => ColorScheme::Dark,
            ThemeMode::System if host_prefers_dark => ColorScheme::Dark,
            ThemeMode::System => ColorScheme::Light,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(format!("Unsupported theme mode '{other}'.")),
        }
    }
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

/// The whole survey document. Loaded once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub meta: Meta,
    pub methodology: Methodology,
    pub surveys: BTreeMap<PeriodId, Survey>,
    pub country_direction: CountryDirection,
    pub presidential: Presidential,
    pub parliamentary: Parliamentary,
    pub ui: Ui,
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_id_parses_canonical_form_only() {
        let p: PeriodId = "2025-03".parse().unwrap();
        assert_eq!((p.year(), p.month()), (2025, 3));
        assert_eq!(p.to_string(), "2025-03");
        assert_eq!(p.chart_form(), "03'2025");

        assert!("2025-3".parse::<PeriodId>().is_err());
        assert!("2025-13".parse::<PeriodId>().is_err());
        assert!("2025-00".parse::<PeriodId>().is_err());
        assert!("03'2025".parse::<PeriodId>().is_err());
    }

    #[test]
    fn period_ids_order_chronologically() {
        let a: PeriodId = "2024-12".parse().unwrap();
        let b: PeriodId = "2025-01".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn month_key_rejects_out_of_range() {
        assert_eq!("01".parse::<MonthKey>().unwrap().index(), 0);
        assert_eq!("12".parse::<MonthKey>().unwrap().index(), 11);
        for bad in ["00", "13", "1", "ab", ""] {
            assert!(bad.parse::<MonthKey>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn bilingual_text_rejects_blank_variants() {
        let ok: BilingualText = serde_json::from_str(r#"{"uk":"Головна","en":"Home"}"#).unwrap();
        assert_eq!(ok.get(Locale::Uk), "Головна");
        assert_eq!(ok.get(Locale::En), "Home");

        assert!(serde_json::from_str::<BilingualText>(r#"{"uk":"","en":"Home"}"#).is_err());
        assert!(serde_json::from_str::<BilingualText>(r#"{"uk":"Головна"}"#).is_err());
    }

    #[test]
    fn locale_codes_are_closed() {
        assert_eq!("uk".parse::<Locale>().unwrap(), Locale::Uk);
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert!("de".parse::<Locale>().is_err());
        assert!("UK".parse::<Locale>().is_err());
    }

    #[test]
    fn theme_mode_resolves_system_preference() {
        assert_eq!(ThemeMode::System.resolve(true), ColorScheme::Dark);
        assert_eq!(ThemeMode::System.resolve(false), ColorScheme::Light);
        assert_eq!(ThemeMode::Light.resolve(true), ColorScheme::Light);
        assert_eq!("dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert!("sepia".parse::<ThemeMode>().is_err());
    }
}

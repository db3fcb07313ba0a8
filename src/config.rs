//! Environment configuration.
//!
//! Values come from the process environment, after loading a `.env` file if
//! one exists. Command-line flags override anything set here.
//!
//! - `UELECTORAL_DATA`: dataset JSON to load instead of the embedded copy
//! - `UELECTORAL_PREFS`: locale preference file
//! - `UELECTORAL_LOG` (else `RUST_LOG`): tracing filter directives

use std::path::PathBuf;

pub const ENV_DATA: &str = "UELECTORAL_DATA";
pub const ENV_PREFS: &str = "UELECTORAL_PREFS";
pub const ENV_LOG: &str = "UELECTORAL_LOG";
pub const ENV_RUST_LOG: &str = "RUST_LOG";

/// Directory under the platform config dir that holds the preference file.
pub const APP_DIR: &str = "uelectoral";
pub const PREFS_FILE: &str = "locale";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub data_path: Option<PathBuf>,
    pub prefs_path: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source. Empty values are
    /// treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            data_path: get(ENV_DATA).map(PathBuf::from),
            prefs_path: get(ENV_PREFS).map(PathBuf::from),
            log_filter: get(ENV_LOG).or_else(|| get(ENV_RUST_LOG)),
        }
    }
}

/// `<config dir>/uelectoral/locale`, if the platform has a config dir.
pub fn default_prefs_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(PREFS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn reads_all_variables() {
        let s = Settings::from_lookup(lookup(&[
            (ENV_DATA, "/tmp/data.json"),
            (ENV_PREFS, "/tmp/locale"),
            (ENV_LOG, "debug"),
        ]));
        assert_eq!(s.data_path, Some(PathBuf::from("/tmp/data.json")));
        assert_eq!(s.prefs_path, Some(PathBuf::from("/tmp/locale")));
        assert_eq!(s.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn own_log_variable_wins_over_rust_log() {
        let s = Settings::from_lookup(lookup(&[(ENV_RUST_LOG, "info")]));
        assert_eq!(s.log_filter.as_deref(), Some("info"));
        let s = Settings::from_lookup(lookup(&[(ENV_RUST_LOG, "info"), (ENV_LOG, "trace")]));
        assert_eq!(s.log_filter.as_deref(), Some("trace"));
    }

    #[test]
    fn blank_values_are_unset() {
        let s = Settings::from_lookup(lookup(&[(ENV_DATA, "  "), (ENV_LOG, "")]));
        assert_eq!(s, Settings::default());
    }
}

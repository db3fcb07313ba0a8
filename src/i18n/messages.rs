//! Embedded message bundles addressed by dot-delimited paths.

use serde_json::Value;

use crate::domain::Locale;
use crate::error::DataError;

const UK_MESSAGES: &str = include_str!("../../messages/uk.json");
const EN_MESSAGES: &str = include_str!("../../messages/en.json");

/// A nested JSON message tree for one locale.
#[derive(Debug, Clone)]
pub struct MessageBundle {
    root: Value,
}

impl MessageBundle {
    pub fn from_json_str(json: &str, what: &str) -> Result<Self, DataError> {
        let root = serde_json::from_str(json).map_err(|source| DataError::Parse {
            what: what.to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    /// The bundle compiled into the binary for `locale`.
    pub fn embedded(locale: Locale) -> Result<Self, DataError> {
        match locale {
            Locale::Uk => Self::from_json_str(UK_MESSAGES, "uk messages"),
            Locale::En => Self::from_json_str(EN_MESSAGES, "en messages"),
        }
    }

    /// The string at `key` (e.g. `"nav.home"`); `None` if the path is missing
    /// or ends at a non-string node.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        key.split('.')
            .try_fold(&self.root, |node, segment| node.get(segment))
            .and_then(Value::as_str)
    }

    /// Like `lookup`, but falls back to the key itself.
    pub fn translate(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_string()
    }
}

/// Both embedded bundles, indexed by locale.
#[derive(Debug, Clone)]
pub struct Messages {
    uk: MessageBundle,
    en: MessageBundle,
}

impl Messages {
    pub fn embedded() -> Result<Self, DataError> {
        Ok(Self {
            uk: MessageBundle::embedded(Locale::Uk)?,
            en: MessageBundle::embedded(Locale::En)?,
        })
    }

    pub fn bundle(&self, locale: Locale) -> &MessageBundle {
        match locale {
            Locale::Uk => &self.uk,
            Locale::En => &self.en,
        }
    }
}

/// Replace `{name}` placeholders in a translated string.
pub fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_paths_resolve() {
        let en = MessageBundle::embedded(Locale::En).unwrap();
        assert_eq!(en.lookup("nav.home"), Some("Home"));
        let uk = MessageBundle::embedded(Locale::Uk).unwrap();
        assert_eq!(uk.lookup("nav.home"), Some("Головна"));
    }

    #[test]
    fn missing_or_non_string_paths_fall_back_to_key() {
        let en = MessageBundle::embedded(Locale::En).unwrap();
        assert_eq!(en.translate("nav.nowhere"), "nav.nowhere");
        assert_eq!(en.translate("nav"), "nav");
        assert_eq!(en.translate("nav.home.deeper"), "nav.home.deeper");
        assert_eq!(en.translate(""), "");
    }

    #[test]
    fn bundles_share_the_same_keys() {
        let messages = Messages::embedded().unwrap();
        fn leaves(prefix: &str, v: &Value, out: &mut Vec<String>) {
            if let Some(map) = v.as_object() {
                for (k, child) in map {
                    let path = if prefix.is_empty() { k.clone() } else { format!("{prefix}.{k}") };
                    leaves(&path, child, out);
                }
            } else {
                out.push(prefix.to_string());
            }
        }
        let (mut uk, mut en) = (Vec::new(), Vec::new());
        leaves("", &messages.bundle(Locale::Uk).root, &mut uk);
        leaves("", &messages.bundle(Locale::En).root, &mut en);
        uk.sort();
        en.sort();
        assert_eq!(uk, en);
    }

    #[test]
    fn placeholders_are_substituted() {
        assert_eq!(interpolate("Sample: {size} people", &[("size", "1000")]), "Sample: 1000 people");
        assert_eq!(interpolate("no vars", &[("size", "1")]), "no vars");
    }
}

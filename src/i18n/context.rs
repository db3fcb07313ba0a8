//! Locale context: the active UI language plus its persisted preference.
//!
//! # Invariants
//! - The persisted preference is read exactly once, in `LocaleContext::new`.
//! - A stored value that is not a supported locale code is ignored.
//! - `set_locale` is the only mutation path; it updates memory and storage.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::Locale;
use crate::error::DataError;
use crate::i18n::messages::{MessageBundle, Messages};

/// Where the chosen locale is remembered between runs.
pub trait PreferenceStore {
    /// The raw stored value, if any. Read failures count as "nothing stored".
    fn load(&self) -> Option<String>;
    fn save(&mut self, locale: Locale) -> Result<(), DataError>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&mut self, locale: Locale) -> Result<(), DataError> {
        (**self).save(locale)
    }
}

/// A one-line text file holding the locale code.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Some(text.trim().to_string()),
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "no stored locale preference");
                None
            }
        }
    }

    fn save(&mut self, locale: Locale) -> Result<(), DataError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                DataError::Preference(format!("cannot create '{}': {e}", parent.display()))
            })?;
        }
        fs::write(&self.path, format!("{}\n", locale.code()))
            .map_err(|e| DataError::Preference(format!("cannot write '{}': {e}", self.path.display())))
    }
}

/// Keeps the preference in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    value: Option<String>,
}

impl MemoryPreferenceStore {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self { value: Some(value.into()) }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Option<String> {
        self.value.clone()
    }

    fn save(&mut self, locale: Locale) -> Result<(), DataError> {
        self.value = Some(locale.code().to_string());
        Ok(())
    }
}

/// The active locale and translation lookup, passed explicitly to whatever
/// renders user-facing text.
pub struct LocaleContext<S: PreferenceStore> {
    locale: Locale,
    store: S,
    messages: Messages,
}

impl<S: PreferenceStore> LocaleContext<S> {
    /// Build a context, restoring the stored locale if it is valid.
    pub fn new(store: S) -> Result<Self, DataError> {
        let locale = match store.load() {
            Some(raw) => match raw.parse::<Locale>() {
                Ok(locale) => locale,
                Err(reason) => {
                    warn!(%reason, "ignoring stored locale preference");
                    Locale::default()
                }
            },
            None => Locale::default(),
        };
        debug!(%locale, "locale context ready");

        Ok(Self {
            locale,
            store,
            messages: Messages::embedded()?,
        })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Switch language and persist the choice.
    ///
    /// The in-memory locale changes even if persisting fails; the error is
    /// still returned so the caller can report it.
    pub fn set_locale(&mut self, locale: Locale) -> Result<(), DataError> {
        self.locale = locale;
        self.store.save(locale)?;
        info!(%locale, "locale changed");
        Ok(())
    }

    /// Translate a dot-delimited key in the active locale; unknown keys come
    /// back unchanged.
    pub fn t(&self, key: &str) -> String {
        self.messages().translate(key)
    }

    pub fn messages(&self) -> &MessageBundle {
        self.messages.bundle(self.locale)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_ukrainian() {
        let ctx = LocaleContext::new(MemoryPreferenceStore::default()).unwrap();
        assert_eq!(ctx.locale(), Locale::Uk);
        assert_eq!(ctx.t("nav.home"), "Головна");
    }

    #[test]
    fn restores_stored_english() {
        let ctx = LocaleContext::new(MemoryPreferenceStore::with_value("en")).unwrap();
        assert_eq!(ctx.locale(), Locale::En);
        assert_eq!(ctx.t("nav.home"), "Home");
    }

    #[test]
    fn ignores_garbage_preference() {
        for raw in ["de", "", "EN", "english"] {
            let ctx = LocaleContext::new(MemoryPreferenceStore::with_value(raw)).unwrap();
            assert_eq!(ctx.locale(), Locale::Uk, "{raw:?}");
        }
    }

    #[test]
    fn set_locale_persists() {
        let mut ctx = LocaleContext::new(MemoryPreferenceStore::default()).unwrap();
        ctx.set_locale(Locale::En).unwrap();
        assert_eq!(ctx.locale(), Locale::En);
        assert_eq!(ctx.store().value(), Some("en"));
        assert_eq!(ctx.t("report.current"), "Current");
    }

    #[test]
    fn t_falls_back_to_key() {
        let ctx = LocaleContext::new(MemoryPreferenceStore::default()).unwrap();
        assert_eq!(ctx.t("does.not.exist"), "does.not.exist");
    }

    #[test]
    fn file_store_round_trips_through_new_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("locale");

        let mut ctx = LocaleContext::new(FilePreferenceStore::new(&path)).unwrap();
        assert_eq!(ctx.locale(), Locale::Uk);
        ctx.set_locale(Locale::En).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "en");

        let reopened = LocaleContext::new(FilePreferenceStore::new(&path)).unwrap();
        assert_eq!(reopened.locale(), Locale::En);
    }

    #[test]
    fn file_store_reads_preference_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locale");
        fs::write(&path, "en\n").unwrap();

        let ctx = LocaleContext::new(FilePreferenceStore::new(&path)).unwrap();
        fs::write(&path, "uk\n").unwrap();
        assert_eq!(ctx.locale(), Locale::En);
    }

    #[test]
    fn boxed_store_is_a_store() {
        let store: Box<dyn PreferenceStore> = Box::new(MemoryPreferenceStore::with_value("en"));
        let mut ctx = LocaleContext::new(store).unwrap();
        assert_eq!(ctx.locale(), Locale::En);
        ctx.set_locale(Locale::Uk).unwrap();
        assert_eq!(ctx.store().load().as_deref(), Some("uk"));
    }

    #[test]
    fn unwritable_file_store_reports_preference_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be.
        let mut store = FilePreferenceStore::new(dir.path());
        let err = store.save(Locale::En).unwrap_err();
        assert!(matches!(err, DataError::Preference(_)));
    }
}

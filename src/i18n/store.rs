//! In-memory locale store: language code -> (lookup key -> resolved string).

use std::collections::HashMap;

/// Translation map: lookup key -> resolved string.
pub type TranslationMap = HashMap<String, String>;

/// Per-instance store of resolved strings, grouped by language.
///
/// Entries are only ever added or overwritten; [`LocaleStore::clear`] is the single
/// removal path.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocaleStore {
    languages: HashMap<String, TranslationMap>,
}

impl LocaleStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Look up the resolved string for a `(language, key)` pair.
    ///
    /// Inputs:
    /// - `language`: Language code (e.g., "es")
    /// - `key`: Lookup key (e.g., "welcome.user")
    ///
    /// Output:
    /// - `Some(&str)` when an entry exists, `None` otherwise
    #[must_use]
    pub fn get(&self, language: &str, key: &str) -> Option<&str> {
        self.languages
            .get(language)
            .and_then(|map| map.get(key))
            .map(String::as_str)
    }

    /// Whether an entry exists for `(language, key)`.
    #[must_use]
    pub fn contains(&self, language: &str, key: &str) -> bool {
        self.get(language, key).is_some()
    }

    /// What: Insert or overwrite one entry.
    ///
    /// Output:
    /// - Previous value for the pair, if any
    pub fn insert(
        &mut self,
        language: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.languages
            .entry(language.to_string())
            .or_default()
            .insert(key.into(), value.into())
    }

    /// What: Merge a batch of entries into one language.
    ///
    /// Inputs:
    /// - `language`: Target language code
    /// - `entries`: `(key, value)` pairs; later pairs win over earlier ones
    ///
    /// Output:
    /// - Number of pairs written
    ///
    /// Details:
    /// - Additive: keys already present but absent from `entries` are kept.
    /// - The language bucket is created even when `entries` is empty, so a loaded
    ///   but empty resource still shows up in [`LocaleStore::languages`].
    pub fn merge<I>(&mut self, language: &str, entries: I) -> usize
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let map = self.languages.entry(language.to_string()).or_default();
        let mut written = 0;
        for (key, value) in entries {
            map.insert(key, value);
            written += 1;
        }
        written
    }

    /// All entries for one language.
    #[must_use]
    pub fn language(&self, language: &str) -> Option<&TranslationMap> {
        self.languages.get(language)
    }

    /// Known language codes, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Total number of entries across all languages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.values().map(HashMap::len).sum()
    }

    /// Whether the store holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every language and entry.
    pub fn clear(&mut self) {
        self.languages.clear();
    }
}

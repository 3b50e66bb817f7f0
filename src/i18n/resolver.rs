//! The resolver: store lookups, online translation with caching, and cache reset.

use std::fmt;
use std::sync::Arc;

use crate::i18n::client::{GoogleTranslator, Translator};
use crate::i18n::config::I18nConfig;
use crate::i18n::loader::{self, LoadSummary};
use crate::i18n::logger::{LogSink, TracingSink};
use crate::i18n::placeholders::{self, Vars};
use crate::i18n::store::LocaleStore;

/// What: Input of an online translation.
///
/// Details:
/// - `text` is the source string sent to the translator on a cache miss.
/// - `key` names the cache slot; the same key always maps to the same slot
///   regardless of `text`.
/// - `language` falls back to the configured default when `None` or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Source text to translate.
    pub text: String,
    /// Lookup key the result is cached under.
    pub key: String,
    /// Target language code.
    pub language: Option<String>,
    /// Substitutions applied to the final string.
    pub vars: Option<Vars>,
}

impl TranslationRequest {
    /// Request translating `text`, cached under `key`.
    #[must_use]
    pub fn new(text: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            key: key.into(),
            ..Self::default()
        }
    }

    /// Target a specific language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Attach variable substitutions.
    #[must_use]
    pub fn with_vars(mut self, vars: Vars) -> Self {
        self.vars = Some(vars);
        self
    }
}

/// What: Resolves lookup keys to localized strings.
///
/// Details:
/// - Owns its [`LocaleStore`]; separate instances never share entries.
/// - Local mode: [`I18n::load`] reads resource files, [`I18n::t`] looks keys up.
/// - Online mode: [`I18n::translate`] fills the store lazily through a [`Translator`].
/// - Mutating operations take `&mut self`, so one instance never runs two of them at once.
pub struct I18n {
    config: I18nConfig,
    store: LocaleStore,
    translator: Option<Box<dyn Translator>>,
    sink: Arc<dyn LogSink>,
}

impl fmt::Debug for I18n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18n")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("has_translator", &self.translator.is_some())
            .finish_non_exhaustive()
    }
}

impl I18n {
    /// What: Build an instance from a configuration.
    ///
    /// Inputs:
    /// - `config`: Instance configuration
    ///
    /// Output:
    /// - Ready instance with an empty store and the `tracing` sink
    ///
    /// # Errors
    /// - Returns `Err` when the configuration is invalid (see [`I18nConfig::validate`]);
    ///   a missing directory is not an error here and is reported by [`I18n::load`]
    /// - Returns `Err` when online mode is on and the HTTP client cannot be built
    ///
    /// Details:
    /// - Online instances get a [`GoogleTranslator`] for the configured endpoint;
    ///   replace it with [`I18n::with_translator`].
    pub fn new(config: I18nConfig) -> Result<Self, String> {
        config.validate()?;
        let translator: Option<Box<dyn Translator>> = if config.online {
            let google = GoogleTranslator::new(&config.endpoint, config.timeout())
                .map_err(|e| e.to_string())?;
            Some(Box::new(google))
        } else {
            None
        };
        Ok(Self {
            config,
            store: LocaleStore::new(),
            translator,
            sink: Arc::new(TracingSink),
        })
    }

    /// Replace the translation client.
    #[must_use]
    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Some(Box::new(translator));
        self
    }

    /// Replace the diagnostics sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &I18nConfig {
        &self.config
    }

    /// Read access to the cached entries.
    #[must_use]
    pub const fn store(&self) -> &LocaleStore {
        &self.store
    }

    /// Languages currently held in the store, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        self.store.languages()
    }

    /// Whether `(language, key)` is cached.
    #[must_use]
    pub fn has(&self, language: &str, key: &str) -> bool {
        self.store.contains(language, key)
    }

    /// Resolve an optional language argument against the default.
    fn language_or_default<'a>(&'a self, language: Option<&'a str>) -> &'a str {
        language
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(self.config.default_language.trim())
    }

    /// What: Read the configured resource directory into the store.
    ///
    /// Output:
    /// - [`LoadSummary`] of what was read; empty when nothing could be loaded
    ///
    /// Details:
    /// - Never fails: directory problems are reported at fatal level, missing files
    ///   as a warning, malformed lines at info level.
    /// - Safe to call repeatedly; entries are merged, never removed.
    /// - Online instances skip loading with a warning.
    pub async fn load(&mut self) -> LoadSummary {
        if self.config.online {
            self.sink
                .warn("load() only applies to local mode; online instances fill the store lazily");
            return LoadSummary::default();
        }
        let Some(dir) = self.config.directory.clone() else {
            self.sink.fatal("No locale directory configured");
            return LoadSummary::default();
        };
        let summary =
            loader::load_directory(&dir, &self.config.extension, &mut self.store, &*self.sink)
                .await;
        tracing::debug!(
            languages = summary.languages.len(),
            entries = summary.entries,
            malformed = summary.malformed_lines,
            "locale directory loaded"
        );
        summary
    }

    /// What: Look up a key in the store.
    ///
    /// Inputs:
    /// - `key`: Lookup key
    /// - `language`: Target language, default language when `None`
    /// - `vars`: Optional `%name%` substitutions
    ///
    /// Output:
    /// - Stored string with substitutions applied, or `key` unchanged on a miss
    #[must_use]
    pub fn t(&self, key: &str, language: Option<&str>, vars: Option<&Vars>) -> String {
        let language = self.language_or_default(language);
        if let Some(value) = self.store.get(language, key) {
            return placeholders::substitute(value, vars);
        }
        self.sink.trace(&format!(
            "Missing translation key '{key}' for language '{language}'; returning key as-is"
        ));
        key.to_string()
    }

    /// What: Resolve a string online, translating and caching on first use.
    ///
    /// Inputs:
    /// - `request`: Source text, cache key, optional language and substitutions
    ///
    /// Output:
    /// - Translated (or fallback) string with substitutions applied
    ///
    /// Details:
    /// - Cache hit: served from the store; the translator is not called.
    /// - Miss: placeholders are swapped for markers, the translator runs once, the
    ///   markers are restored and the result is cached under `(language, key)`.
    /// - Translator failure: error diagnostic, the source text is returned and cached
    ///   unless `cache_failures` is off.
    /// - Empty text or key: error diagnostic, best-effort fallback, nothing cached.
    /// - Local-mode instance: warning, source text returned, nothing cached.
    pub async fn translate(&mut self, request: &TranslationRequest) -> String {
        let vars = request.vars.as_ref();
        if request.text.trim().is_empty() || request.key.trim().is_empty() {
            self.sink.error(&format!(
                "translate() needs both source text and key (key: '{}', text: '{}')",
                request.key, request.text
            ));
            let fallback = if request.text.trim().is_empty() {
                &request.key
            } else {
                &request.text
            };
            return placeholders::substitute(fallback, vars);
        }

        let language = self
            .language_or_default(request.language.as_deref())
            .to_string();
        if let Some(cached) = self.store.get(&language, &request.key) {
            return placeholders::substitute(cached, vars);
        }

        let translator = match self.translator.as_deref() {
            Some(translator) if self.config.online => translator,
            _ => {
                self.sink.warn(&format!(
                    "Online mode is off; returning source text for key '{}'",
                    request.key
                ));
                return placeholders::substitute(&request.text, vars);
            }
        };

        let protected = placeholders::protect(&request.text);
        let outcome = translator
            .translate(&protected.text, &self.config.source_language, &language)
            .await;
        let resolved = match outcome {
            Ok(translated) => {
                self.sink.trace(&format!(
                    "Translated key '{}' into '{language}'",
                    request.key
                ));
                protected.restore(&translated)
            }
            Err(e) => {
                self.sink.error(&format!(
                    "Translation of key '{}' into '{language}' failed: {e}; using source text",
                    request.key
                ));
                if !self.config.cache_failures {
                    return placeholders::substitute(&request.text, vars);
                }
                request.text.clone()
            }
        };

        let output = placeholders::substitute(&resolved, vars);
        self.store.insert(&language, request.key.as_str(), resolved);
        output
    }

    /// What: Drop every cached entry for every language.
    ///
    /// Details:
    /// - The only way entries leave the store; later online lookups call the
    ///   translator again, local lookups miss until the next [`I18n::load`].
    pub fn reset(&mut self) {
        let dropped = self.store.len();
        self.store.clear();
        self.sink
            .trace(&format!("Locale store cleared ({dropped} entries dropped)"));
    }
}

//! Resolver configuration and its YAML file form.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::i18n::loader::is_valid_language_code;

/// Default public translation endpoint used in online mode.
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
/// Default resource file extension.
pub const DEFAULT_EXTENSION: &str = "lang";
/// Default HTTP timeout for translation requests, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// What: Configuration of one [`crate::i18n::I18n`] instance.
///
/// Details:
/// - Every field has a default so partial YAML files deserialize; only
///   `default_language` must be filled in before the instance is built.
/// - Setters consume and return `self` for chaining.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Language used when a lookup does not name one.
    pub default_language: String,
    /// Directory of `<language>.<extension>` resources (local mode).
    pub directory: Option<PathBuf>,
    /// Resolve misses through the translation client instead of returning the key.
    pub online: bool,
    /// Resource file extension, without the dot.
    pub extension: String,
    /// Source language passed to the translator ("auto" lets it detect).
    pub source_language: String,
    /// Translation endpoint URL.
    pub endpoint: String,
    /// Translation request timeout in seconds.
    pub timeout_secs: u64,
    /// Cache the untranslated source text when the translator fails.
    pub cache_failures: bool,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: String::new(),
            directory: None,
            online: false,
            extension: DEFAULT_EXTENSION.to_string(),
            source_language: "auto".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache_failures: true,
        }
    }
}

impl I18nConfig {
    /// Start a configuration with the given default language.
    #[must_use]
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
            ..Self::default()
        }
    }

    /// Set the resource directory.
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Switch online mode on or off.
    #[must_use]
    pub fn with_online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }

    /// Set the resource file extension (a leading dot is ignored).
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Set the translator's source language.
    #[must_use]
    pub fn with_source_language(mut self, source_language: impl Into<String>) -> Self {
        self.source_language = source_language.into();
        self
    }

    /// Set the translation endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Choose whether translator failures are cached.
    #[must_use]
    pub fn with_cache_failures(mut self, cache_failures: bool) -> Self {
        self.cache_failures = cache_failures;
        self
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// What: Check the configuration before building an instance.
    ///
    /// Output:
    /// - `Ok(())` or a human-readable reason
    ///
    /// # Errors
    /// - Returns `Err` when `default_language` is empty or not a language code
    /// - Returns `Err` when the extension is empty
    /// - Returns `Err` in online mode with an empty endpoint or a zero timeout
    pub fn validate(&self) -> Result<(), String> {
        let default_language = self.default_language.trim();
        if default_language.is_empty() {
            return Err("default_language is required".to_string());
        }
        if !is_valid_language_code(default_language) {
            return Err(format!(
                "Invalid default_language '{default_language}'. Expected format: language[-region] (e.g., 'en', 'es-MX')"
            ));
        }
        if self.extension.trim().is_empty() {
            return Err("extension cannot be empty".to_string());
        }
        if self.online {
            if self.endpoint.trim().is_empty() {
                return Err("endpoint cannot be empty in online mode".to_string());
            }
            if self.timeout_secs == 0 {
                return Err("timeout_secs must be greater than zero".to_string());
            }
        }
        Ok(())
    }
}

/// What: Load an [`I18nConfig`] from a YAML file.
///
/// Inputs:
/// - `path`: Path to the YAML file
///
/// Output:
/// - Parsed configuration (not yet validated)
///
/// # Errors
/// - Returns `Err` when the file does not exist or cannot be read
/// - Returns `Err` when the file is empty
/// - Returns `Err` when the YAML cannot be parsed
///
/// Details:
/// - A relative `directory` is resolved against the config file's directory.
/// - A leading dot in `extension` is ignored, as with [`I18nConfig::with_extension`].
pub fn load_config_file(path: &Path) -> Result<I18nConfig, String> {
    if !path.exists() {
        return Err(format!("Config file not found: {}", path.display()));
    }
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
    if contents.trim().is_empty() {
        return Err(format!("Config file is empty: {}", path.display()));
    }
    let mut config = parse_config_yaml(&contents).map_err(|e| {
        format!(
            "Failed to parse config file {}: {e}. Please check YAML syntax.",
            path.display()
        )
    })?;
    config.extension = config.extension.trim_start_matches('.').to_string();
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    config.directory = config
        .directory
        .map(|dir| if dir.is_relative() { base.join(dir) } else { dir });
    Ok(config)
}

/// Parse YAML text into an [`I18nConfig`].
fn parse_config_yaml(yaml: &str) -> Result<I18nConfig, String> {
    serde_norway::from_str(yaml).map_err(|e| format!("Failed to parse YAML: {e}"))
}

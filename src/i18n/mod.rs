//! Internationalization (i18n) core for lingo-t.
//!
//! This module resolves lookup keys to localized strings, either from flat resource
//! files loaded up front or from an online translator with an in-memory cache.
//!
//! # Overview
//!
//! - **Locale Store** ([`LocaleStore`]): language code -> (key -> string), owned per instance
//! - **Loader** ([`loader`]): reads `<language>.<ext>` files made of `key=value` lines
//! - **Translator** ([`Translator`]): pluggable client; [`GoogleTranslator`] by default
//! - **Resolver** ([`I18n`]): `t()` for lookups, `translate()` for online resolution,
//!   `reset()` to drop the cache
//! - **Placeholders** ([`placeholders`]): `%name%` substitution and protection
//! - **Log sink** ([`LogSink`]): info/trace/warn/error/fatal diagnostics
//!
//! # Resource Files
//!
//! ```text
//! # es.lang
//! greeting = Hola
//! welcome.user = Hola %user%, bienvenido a %place%.
//! ```
//!
//! Blank lines and `#` comments are ignored; the first `=` separates key and value.
//!
//! # Usage
//!
//! ```rust,no_run
//! use lingo_t::i18n::{I18n, I18nConfig, TranslationRequest, Vars};
//!
//! # async fn demo() -> Result<(), String> {
//! let mut local = I18n::new(I18nConfig::new("es").with_directory("locales"))?;
//! local.load().await;
//! let mut vars = Vars::new();
//! vars.insert("user".to_string(), "Ana".to_string());
//! let text = local.t("welcome.user", None, Some(&vars));
//!
//! let mut online = I18n::new(I18nConfig::new("de").with_online(true))?;
//! let text = online
//!     .translate(&TranslationRequest::new("Hello %user%", "greeting").with_vars(vars))
//!     .await;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - Only [`I18n::new`] can fail (invalid configuration)
//! - Lookups never fail: misses return the key, translator failures return the source text
//! - All problems are reported through the instance's [`LogSink`]

pub mod client;
pub mod config;
mod detection;
pub mod loader;
pub mod logger;
pub mod placeholders;
mod resolver;
pub mod store;

pub use client::{GoogleTranslator, Translator};
pub use config::{I18nConfig, load_config_file};
pub use detection::{detect_system_locale, language_candidates, pick_language};
pub use loader::LoadSummary;
pub use logger::{Level, LogSink, MemorySink, TracingSink};
pub use placeholders::{Vars, substitute, vars_from_json};
pub use resolver::{I18n, TranslationRequest};
pub use store::{LocaleStore, TranslationMap};

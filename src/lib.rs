//! Library entry for lingo-t exposing the resolver for embedding and integration tests.

pub mod i18n;

pub use i18n::{I18n, I18nConfig, TranslationRequest, Vars};

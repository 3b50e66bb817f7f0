//! Integration tests for local mode.
//!
//! Tests cover:
//! - Valid `key=value` lines resolving to their trimmed values
//! - Malformed lines being excluded
//! - Unknown keys falling back to the key
//! - Additive reloads and reset
//! - Independent instances

#![cfg(test)]

use std::fs;
use std::sync::Arc;

use lingo_t::i18n::{I18n, I18nConfig, Level, MemorySink, Vars};
use tempfile::TempDir;

/// What: Build a local instance over a fresh directory.
///
/// Inputs:
/// - `files`: `(file name, contents)` pairs written into the directory
///
/// Output:
/// - Temp directory guard, instance (not yet loaded), and its memory sink
fn local_instance(files: &[(&str, &str)]) -> (TempDir, I18n, MemorySink) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    for (name, contents) in files {
        fs::write(temp_dir.path().join(name), contents).expect("Failed to write locale file");
    }
    let sink = MemorySink::new();
    let i18n = I18n::new(I18nConfig::new("en").with_directory(temp_dir.path()))
        .expect("Failed to build local instance")
        .with_sink(Arc::new(sink.clone()));
    (temp_dir, i18n, sink)
}

fn vars(pairs: &[(&str, &str)]) -> Vars {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[tokio::test]
/// What: Every valid line resolves to its trimmed value; malformed lines are absent.
///
/// Inputs:
/// - An `es.lang` mixing padded entries, comments, blanks, and each malformed shape.
///
/// Output:
/// - Valid keys resolve; malformed keys fall back to the key; one info line per reject.
async fn integration_valid_and_malformed_lines() {
    let contents = "\
# Spanish
greeting   =   Hola
  farewell=Adiós

welcome.user = Hola %user%, bienvenido a %place%.
no separator here
= orphan value
empty.value =
math = 1+1=2
";
    let (_dir, mut i18n, sink) = local_instance(&[("es.lang", contents)]);
    let summary = i18n.load().await;

    assert_eq!(summary.languages, vec!["es".to_string()]);
    assert_eq!(summary.entries, 4);
    assert_eq!(summary.malformed_lines, 3);

    assert_eq!(i18n.t("greeting", Some("es"), None), "Hola");
    assert_eq!(i18n.t("farewell", Some("es"), None), "Adiós");
    assert_eq!(i18n.t("math", Some("es"), None), "1+1=2");
    assert_eq!(i18n.t("empty.value", Some("es"), None), "empty.value");
    assert!(!i18n.has("es", "no separator here"));
    assert!(!i18n.has("es", ""));

    assert_eq!(sink.messages_at(Level::Info).len(), 3);
}

#[tokio::test]
/// What: The substitution example resolves end to end.
async fn integration_variable_substitution() {
    let (_dir, mut i18n, _sink) = local_instance(&[(
        "es.lang",
        "welcome.user=Hola %user%, bienvenido a %place%.\n",
    )]);
    i18n.load().await;

    assert_eq!(
        i18n.t(
            "welcome.user",
            Some("es"),
            Some(&vars(&[("user", "A"), ("place", "B")]))
        ),
        "Hola A, bienvenido a B."
    );
    assert_eq!(
        i18n.t("welcome.user", Some("es"), Some(&vars(&[("user", "A")]))),
        "Hola A, bienvenido a %place%."
    );
}

#[tokio::test]
/// What: Unknown keys and unknown languages return the key unchanged.
async fn integration_unknown_key_returns_key() {
    let (_dir, mut i18n, _sink) = local_instance(&[("en.lang", "greeting=Hello\n")]);
    i18n.load().await;

    assert_eq!(i18n.t("greeting", None, None), "Hello");
    assert_eq!(i18n.t("missing.key", None, None), "missing.key");
    assert_eq!(i18n.t("greeting", Some("ja"), None), "greeting");
    assert_eq!(i18n.t("%user%", None, Some(&vars(&[("user", "x")]))), "%user%");
}

#[tokio::test]
/// What: Reloading merges additively and reset empties the store.
///
/// Inputs:
/// - Load, then rewrite `en.lang` without one key and with one changed value, load again.
///
/// Output:
/// - Dropped key still resolves, changed value is updated; after reset nothing resolves.
async fn integration_reload_is_additive_and_reset_clears() {
    let (dir, mut i18n, _sink) = local_instance(&[("en.lang", "a=one\nb=two\n")]);
    i18n.load().await;
    let first = i18n.store().clone();
    i18n.load().await;
    assert_eq!(i18n.store(), &first);

    fs::write(dir.path().join("en.lang"), "b=TWO\nc=three\n").expect("Failed to rewrite en.lang");
    i18n.load().await;

    assert_eq!(i18n.t("a", None, None), "one");
    assert_eq!(i18n.t("b", None, None), "TWO");
    assert_eq!(i18n.t("c", None, None), "three");

    i18n.reset();
    assert!(i18n.store().is_empty());
    assert_eq!(i18n.t("a", None, None), "a");
}

#[tokio::test]
/// What: Two instances over different directories do not see each other's entries.
async fn integration_instances_are_independent() {
    let (_dir_a, mut a, _) = local_instance(&[("en.lang", "greeting=Hello\n")]);
    let (_dir_b, mut b, _) = local_instance(&[("en.lang", "greeting=Howdy\n")]);
    a.load().await;
    b.load().await;

    assert_eq!(a.t("greeting", None, None), "Hello");
    assert_eq!(b.t("greeting", None, None), "Howdy");

    a.reset();
    assert_eq!(a.t("greeting", None, None), "greeting");
    assert_eq!(b.t("greeting", None, None), "Howdy");
}

#[tokio::test]
/// What: A missing directory is reported as fatal and the instance stays usable.
async fn integration_missing_directory_is_fatal_not_panic() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let sink = MemorySink::new();
    let mut i18n = I18n::new(I18nConfig::new("en").with_directory(temp_dir.path().join("gone")))
        .expect("Failed to build local instance")
        .with_sink(Arc::new(sink.clone()));

    let summary = i18n.load().await;

    assert!(summary.languages.is_empty());
    assert_eq!(sink.messages_at(Level::Fatal).len(), 1);
    assert_eq!(i18n.t("greeting", None, None), "greeting");
}

#[tokio::test]
/// What: A custom extension selects which files are read.
async fn integration_custom_extension() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    fs::write(temp_dir.path().join("fr.properties"), "greeting=Bonjour\n")
        .expect("Failed to write fr.properties");
    fs::write(temp_dir.path().join("de.lang"), "greeting=Hallo\n").expect("Failed to write de.lang");

    let mut i18n = I18n::new(
        I18nConfig::new("fr")
            .with_directory(temp_dir.path())
            .with_extension("properties"),
    )
    .expect("Failed to build local instance")
    .with_sink(Arc::new(MemorySink::new()));
    i18n.load().await;

    assert_eq!(i18n.languages(), vec!["fr"]);
    assert_eq!(i18n.t("greeting", None, None), "Bonjour");
}

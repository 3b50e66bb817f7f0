//! Integration tests for YAML configuration files.

#![cfg(test)]

use std::fs;

use lingo_t::i18n::{I18n, load_config_file};
use tempfile::TempDir;

#[tokio::test]
/// What: A config file with a relative directory drives a full local load.
///
/// Inputs:
/// - `i18n.yml` next to a `locales/` directory holding `es.txt`.
///
/// Output:
/// - The instance loads `es.txt` and resolves through the default language.
async fn integration_config_file_drives_local_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let locales = temp_dir.path().join("locales");
    fs::create_dir(&locales).expect("Failed to create locales directory");
    fs::write(locales.join("es.txt"), "greeting = Hola\n").expect("Failed to write es.txt");
    let config_path = temp_dir.path().join("i18n.yml");
    fs::write(
        &config_path,
        "default_language: es\ndirectory: locales\nextension: txt\n",
    )
    .expect("Failed to write i18n.yml");

    let config = load_config_file(&config_path).expect("Failed to load i18n.yml");
    let mut i18n = I18n::new(config).expect("Failed to build instance from config");
    let summary = i18n.load().await;

    assert_eq!(summary.languages, vec!["es".to_string()]);
    assert_eq!(i18n.t("greeting", None, None), "Hola");
}

#[test]
/// What: A config without a default language is rejected at construction.
fn integration_config_file_requires_default_language() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let config_path = temp_dir.path().join("i18n.yml");
    fs::write(&config_path, "directory: locales\n").expect("Failed to write i18n.yml");

    let config = load_config_file(&config_path).expect("Failed to load i18n.yml");
    let err = I18n::new(config).expect_err("missing default language must be rejected");
    assert!(err.contains("default_language"));
}

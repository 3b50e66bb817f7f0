//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::Parser;
use lingo_t::i18n::{I18nConfig, load_config_file};

/// lingo-t - Resolve lookup keys from key=value locale files or an online translator
#[derive(Parser, Debug)]
#[command(name = "lingo-t")]
#[command(version)]
#[command(about = "Resolve lookup keys from key=value locale files or an online translator", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// YAML configuration file (default_language, directory, online, extension, ...)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding <language>.<ext> resource files
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Resource file extension (default: lang)
    #[arg(long)]
    pub ext: Option<String>,

    /// Default language when --lang is absent and no system locale matches
    #[arg(long)]
    pub default_lang: Option<String>,

    /// Target language (default: system locale, then the default language)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Resolve through the online translator instead of local files
    #[arg(long)]
    pub online: bool,

    /// Translation request timeout in seconds (online mode)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Lookup key to resolve
    #[arg(short, long)]
    pub key: Option<String>,

    /// Source text to translate (online mode; the key defaults to the text)
    #[arg(short, long)]
    pub text: Option<String>,

    /// Placeholder substitution NAME=VALUE (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub vars: Vec<String>,

    /// Placeholder substitutions as a JSON object
    #[arg(long)]
    pub vars_json: Option<String>,

    /// List loaded languages and exit
    #[arg(long)]
    pub list_languages: bool,
}

/// What: Build the resolver configuration from the config file and flags.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - `Ok(I18nConfig)` ready for validation, or an error message.
///
/// # Errors
/// - Returns `Err` when `--config` points at a missing or unparsable file.
///
/// Details:
/// - Flags override values from the config file.
/// - Without any default language, "en" is used.
pub fn build_config(args: &Args) -> Result<I18nConfig, String> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => I18nConfig::default(),
    };
    if let Some(dir) = &args.dir {
        config = config.with_directory(dir.clone());
    }
    if let Some(ext) = &args.ext {
        config = config.with_extension(ext);
    }
    if let Some(default_lang) = &args.default_lang {
        config.default_language.clone_from(default_lang);
    }
    if config.default_language.trim().is_empty() {
        config.default_language = "en".to_string();
    }
    if args.online {
        config = config.with_online(true);
    }
    if let Some(timeout) = args.timeout {
        config = config.with_timeout_secs(timeout);
    }
    Ok(config)
}

//! Command-line resolution: build an instance, load or translate, print the result.

use lingo_t::i18n::{
    I18n, TranslationRequest, detect_system_locale, language_candidates, pick_language,
};

use crate::args::Args;
use crate::args::definition::build_config;
use crate::args::utils::collect_vars;

/// What: Run one CLI invocation.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - `Ok(())` after printing the resolved string (or language list) to stdout.
///
/// # Errors
/// - Returns `Err` for configuration problems, malformed substitutions, or when
///   neither `--key`, `--text` nor `--list-languages` was given.
///
/// Details:
/// - Local mode loads the resource directory first.
/// - `--text` goes through the online translator; the cache key defaults to the text.
/// - `--key` alone is a store lookup.
pub async fn handle_resolve(args: &Args) -> Result<(), String> {
    let config = build_config(args)?;
    let mut i18n = I18n::new(config)?;

    if !i18n.config().online {
        let summary = i18n.load().await;
        tracing::info!(
            languages = ?summary.languages,
            entries = summary.entries,
            malformed = summary.malformed_lines,
            failed = summary.failed_files.len(),
            "Locale resources loaded"
        );
    }

    if args.list_languages {
        for language in i18n.languages() {
            println!("{language}");
        }
        return Ok(());
    }

    let vars = collect_vars(&args.vars, args.vars_json.as_deref())?;
    let vars = (!vars.is_empty()).then_some(vars);
    let language = target_language(args, &i18n);
    tracing::debug!(language = %language, "Target language selected");

    let output = match (&args.text, &args.key) {
        (Some(text), key) => {
            let key = key.clone().unwrap_or_else(|| text.clone());
            let mut request = TranslationRequest::new(text.clone(), key).with_language(language);
            request.vars = vars;
            i18n.translate(&request).await
        }
        (None, Some(key)) => i18n.t(key, Some(&language), vars.as_ref()),
        (None, None) => {
            return Err("Nothing to resolve: pass --key, --text, or --list-languages".to_string());
        }
    };
    println!("{output}");
    Ok(())
}

/// What: Pick the language for this invocation.
///
/// Details:
/// - `--lang` wins.
/// - Local mode: the system locale if a matching resource was loaded, else the default.
/// - Online mode: the system locale's primary subtag ("de" for "de-AT"), else the default.
fn target_language(args: &Args, i18n: &I18n) -> String {
    if let Some(lang) = args.lang.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        return lang.to_string();
    }
    let detected = detect_system_locale();
    let default_language = i18n.config().default_language.as_str();
    if i18n.config().online {
        return detected
            .and_then(|code| language_candidates(&code).pop())
            .unwrap_or_else(|| default_language.to_string());
    }
    pick_language(detected.as_deref(), &i18n.languages(), default_language)
}

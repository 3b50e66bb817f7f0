//! System locale detection utilities.

use std::env;

/// Environment variables consulted, highest priority first.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// What: Detect system locale from environment variables.
///
/// Output:
/// - `Option<String>` containing a locale code (e.g., "de-DE") or `None` if not detectable
///
/// Details:
/// - Checks `LC_ALL`, `LC_MESSAGES`, and `LANG` in order
/// - Parses locale strings like "de_DE.UTF-8" -> "de-DE"
/// - The "C" and "POSIX" locales count as "not set"
#[must_use]
pub fn detect_system_locale() -> Option<String> {
    detect_locale_with(|name| env::var(name).ok())
}

/// What: Detect a locale through an arbitrary variable lookup.
///
/// Inputs:
/// - `lookup`: Returns the value of an environment-style variable, if set
///
/// Output:
/// - First parsable locale in `LC_ALL`, `LC_MESSAGES`, `LANG` order
pub fn detect_locale_with<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    LOCALE_VARS
        .iter()
        .filter_map(|&name| lookup(name))
        .find_map(|value| parse_locale_string(&value))
}

/// What: Parse a POSIX-style locale string into a language code.
///
/// Inputs:
/// - `locale_str`: Locale string like "de_DE.UTF-8", "de-DE", "sr_RS@latin"
///
/// Output:
/// - `Option<String>` with normalized format (e.g., "de-DE") or `None` if invalid
///
/// Details:
/// - Strips the encoding (".UTF-8") and modifier ("@euro")
/// - Converts underscores to hyphens; language lowercase, region uppercase
/// - Three-part codes are read as language-script-region (e.g., "zh-Hans-CN")
fn parse_locale_string(locale_str: &str) -> Option<String> {
    let locale_part = locale_str.trim().split(['.', '@']).next()?.trim();
    if locale_part.is_empty()
        || locale_part.eq_ignore_ascii_case("C")
        || locale_part.eq_ignore_ascii_case("POSIX")
    {
        return None;
    }

    let normalized = locale_part.replace('_', "-");
    let parts: Vec<&str> = normalized.split('-').collect();
    let code = match parts.as_slice() {
        [language] => language.to_lowercase(),
        [language, region] => format!("{}-{}", language.to_lowercase(), region.to_uppercase()),
        [language, script, region] => format!(
            "{}-{script}-{}",
            language.to_lowercase(),
            region.to_uppercase()
        ),
        _ => return None,
    };
    crate::i18n::loader::is_valid_language_code(&code).then_some(code)
}

/// What: List the codes worth trying for a detected locale, most specific first.
///
/// Inputs:
/// - `code`: Locale code such as "de-CH" or "zh-Hans-CN"
///
/// Output:
/// - Candidates, e.g. `["de-CH", "de"]`
#[must_use]
pub fn language_candidates(code: &str) -> Vec<String> {
    let mut candidates = vec![code.to_string()];
    if let Some((primary, _)) = code.split_once(['-', '_'])
        && !primary.is_empty()
    {
        candidates.push(primary.to_string());
    }
    candidates
}

/// What: Choose the language to serve given a detected locale and the loaded languages.
///
/// Inputs:
/// - `detected`: Detected locale, if any
/// - `available`: Languages present in the store
/// - `default_language`: Configured default
///
/// Output:
/// - First candidate of `detected` that is available, otherwise `default_language`
#[must_use]
pub fn pick_language(detected: Option<&str>, available: &[&str], default_language: &str) -> String {
    detected
        .into_iter()
        .flat_map(language_candidates)
        .find(|candidate| available.contains(&candidate.as_str()))
        .unwrap_or_else(|| default_language.to_string())
}

//! Locale resource loading and `key=value` line parsing.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::i18n::logger::LogSink;
use crate::i18n::store::LocaleStore;

/// Why a resource line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// No `=` on the line.
    MissingSeparator,
    /// Nothing (after trimming) before the first `=`.
    EmptyKey,
    /// Nothing (after trimming) after the first `=`.
    EmptyValue,
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MissingSeparator => "missing '=' separator",
            Self::EmptyKey => "empty key",
            Self::EmptyValue => "empty value",
        };
        f.write_str(s)
    }
}

/// Outcome of [`crate::i18n::I18n::load`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    /// Languages read from disk, sorted.
    pub languages: Vec<String>,
    /// Entries written into the store.
    pub entries: usize,
    /// Lines skipped as malformed.
    pub malformed_lines: usize,
    /// Resources that could not be read.
    pub failed_files: Vec<PathBuf>,
}

/// What: Parse one resource line.
///
/// Inputs:
/// - `line`: Raw line without its terminator
///
/// Output:
/// - `Ok(Some((key, value)))` for an entry
/// - `Ok(None)` for blank lines and `#` comments
/// - `Err(Malformed)` otherwise
///
/// Details:
/// - The first `=` splits key from value; later `=` belong to the value.
/// - Key and value are trimmed; no other escaping is applied.
pub fn parse_line(line: &str) -> Result<Option<(String, String)>, Malformed> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let (raw_key, raw_value) = trimmed
        .split_once('=')
        .ok_or(Malformed::MissingSeparator)?;
    let key = raw_key.trim();
    let value = raw_value.trim();
    if key.is_empty() {
        return Err(Malformed::EmptyKey);
    }
    if value.is_empty() {
        return Err(Malformed::EmptyValue);
    }
    Ok(Some((key.to_string(), value.to_string())))
}

/// Parsed contents of one resource: entries plus rejected lines (1-based line numbers).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedResource {
    /// Accepted entries in file order.
    pub entries: Vec<(String, String)>,
    /// Rejected lines with their reason.
    pub malformed: Vec<(usize, Malformed)>,
}

/// What: Parse a whole resource file.
///
/// Inputs:
/// - `contents`: UTF-8 text of the file
///
/// Output:
/// - [`ParsedResource`]
///
/// Details:
/// - A leading byte-order mark is ignored.
#[must_use]
pub fn parse_resource(contents: &str) -> ParsedResource {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    let mut parsed = ParsedResource::default();
    for (index, line) in contents.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(entry)) => parsed.entries.push(entry),
            Ok(None) => {}
            Err(reason) => parsed.malformed.push((index + 1, reason)),
        }
    }
    parsed
}

/// What: Validate a language code used as a resource file stem.
///
/// Inputs:
/// - `code`: Candidate code (e.g., "es", "en-US", "pt_BR")
///
/// Output:
/// - `true` if the format looks valid
///
/// Details:
/// - Alphanumerics plus `-`/`_` separators, at most 20 characters
/// - No leading, trailing, or doubled separators
#[must_use]
pub fn is_valid_language_code(code: &str) -> bool {
    if code.is_empty() || code.len() > 20 {
        return false;
    }
    let is_sep = |c: char| c == '-' || c == '_';
    code.chars().all(|c| c.is_alphanumeric() || is_sep(c))
        && !code.starts_with(is_sep)
        && !code.ends_with(is_sep)
        && !code
            .chars()
            .zip(code.chars().skip(1))
            .any(|(a, b)| is_sep(a) && is_sep(b))
}

/// What: Find `<language>.<extension>` resources in a directory.
///
/// Output:
/// - `(language, path)` pairs sorted by language
///
/// Errors:
/// - Returns `Err` when the directory cannot be listed
async fn discover_resources(
    dir: &Path,
    extension: &str,
    sink: &dyn LogSink,
) -> std::io::Result<Vec<(String, PathBuf)>> {
    let mut found = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());
        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if !is_file || !matches_ext {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !is_valid_language_code(stem) {
            sink.trace(&format!(
                "Ignoring {}: '{stem}' is not a language code",
                path.display()
            ));
            continue;
        }
        found.push((stem.to_string(), path));
    }
    found.sort();
    Ok(found)
}

/// What: Load every resource in `dir` into `store`.
///
/// Inputs:
/// - `dir`: Directory holding `<language>.<extension>` files
/// - `extension`: File extension without the dot
/// - `store`: Destination store; existing entries are kept
/// - `sink`: Diagnostics sink
///
/// Output:
/// - [`LoadSummary`] describing what was read
///
/// Details:
/// - Missing or unlistable directory: fatal diagnostic, nothing loaded
/// - No matching files: warning, store untouched
/// - Unreadable file: error diagnostic, remaining files still load
/// - Malformed lines: info diagnostic with `path:line`, line skipped
pub async fn load_directory(
    dir: &Path,
    extension: &str,
    store: &mut LocaleStore,
    sink: &dyn LogSink,
) -> LoadSummary {
    let mut summary = LoadSummary::default();

    let is_dir = tokio::fs::metadata(dir).await.is_ok_and(|m| m.is_dir());
    if !is_dir {
        sink.fatal(&format!(
            "Locale directory {} does not exist or is not a directory",
            dir.display()
        ));
        return summary;
    }

    let resources = match discover_resources(dir, extension, sink).await {
        Ok(resources) => resources,
        Err(e) => {
            sink.fatal(&format!(
                "Failed to list locale directory {}: {e}",
                dir.display()
            ));
            return summary;
        }
    };

    if resources.is_empty() {
        sink.warn(&format!(
            "No *.{extension} locale files found in {}",
            dir.display()
        ));
        return summary;
    }

    for (language, path) in resources {
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) => {
                sink.error(&format!("Failed to read locale file {}: {e}", path.display()));
                summary.failed_files.push(path);
                continue;
            }
        };

        let parsed = parse_resource(&contents);
        for (line, reason) in &parsed.malformed {
            sink.info(&format!(
                "{}:{line}: skipping malformed line ({reason})",
                path.display()
            ));
        }
        summary.malformed_lines += parsed.malformed.len();

        let written = store.merge(&language, parsed.entries);
        sink.trace(&format!(
            "Loaded locale '{language}' with {written} translation keys"
        ));
        summary.entries += written;
        summary.languages.push(language);
    }

    summary
}

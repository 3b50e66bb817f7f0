//! `%name%` placeholder handling: substitution, and protection around translator calls.

use std::collections::HashMap;

use serde_json::Value;

/// Variable substitutions: placeholder name (without `%`) -> replacement text.
pub type Vars = HashMap<String, String>;

/// Prefix of the temporary marker standing in for a placeholder during translation.
const MARKER_PREFIX: &str = "__PH";
/// Suffix of the temporary marker.
const MARKER_SUFFIX: &str = "__";

/// What: Replace `%name%` occurrences with values from `vars`.
///
/// Inputs:
/// - `text`: Resolved string, possibly containing placeholders
/// - `vars`: Optional substitutions
///
/// Output:
/// - New string with every known placeholder replaced
///
/// Details:
/// - Single left-to-right pass, so replacement values are never re-scanned.
/// - Placeholders without a matching entry stay literal.
/// - A lone `%` (e.g., "50% off") is kept as-is.
#[must_use]
pub fn substitute(text: &str, vars: Option<&Vars>) -> String {
    match vars {
        Some(vars) if !vars.is_empty() => {
            replace_placeholders(text, |name| vars.get(name).cloned())
        }
        _ => text.to_string(),
    }
}

/// Scan `text` for `%name%` and splice in whatever `lookup` returns.
fn replace_placeholders<F>(text: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        if let Some(end) = after.find('%')
            && let Some(value) = lookup(&after[..end])
        {
            out.push_str(&value);
            rest = &after[end + 1..];
            continue;
        }
        out.push('%');
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Whether `name` looks like a placeholder identifier (`user`, `item.count`, `first-name`).
fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Text with its placeholders swapped for translator-safe markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protected {
    /// Text sent to the translator.
    pub text: String,
    /// Original placeholders, indexed by marker number.
    pub placeholders: Vec<String>,
    /// Marker prefix; never occurs in the source text.
    prefix: String,
}

impl Protected {
    /// What: Put the original placeholders back into translated text.
    ///
    /// Inputs:
    /// - `translated`: Translator output that still carries the markers
    ///
    /// Output:
    /// - Translated text with each marker replaced by its `%name%` placeholder
    ///
    /// Details:
    /// - Single left-to-right pass; restored placeholders are never scanned again.
    /// - Markers the translator dropped are simply absent from the result.
    /// - Marker-like text with an unknown index is kept verbatim.
    #[must_use]
    pub fn restore(&self, translated: &str) -> String {
        if self.placeholders.is_empty() {
            return translated.to_string();
        }
        let mut out = String::with_capacity(translated.len());
        let mut rest = translated;
        while let Some(start) = rest.find(self.prefix.as_str()) {
            out.push_str(&rest[..start]);
            let after = &rest[start + self.prefix.len()..];
            let digits = after.len()
                - after
                    .trim_start_matches(|c: char| c.is_ascii_digit())
                    .len();
            if digits > 0
                && after[digits..].starts_with(MARKER_SUFFIX)
                && let Some(placeholder) = after[..digits]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.placeholders.get(index))
            {
                out.push_str(placeholder);
                rest = &after[digits + MARKER_SUFFIX.len()..];
                continue;
            }
            out.push_str(&self.prefix);
            rest = after;
        }
        out.push_str(rest);
        out
    }
}

/// Shortest `__PH`, `__PHX`, `__PHXX`, ... prefix absent from `text`.
fn marker_prefix(text: &str) -> String {
    let mut prefix = MARKER_PREFIX.to_string();
    while text.contains(prefix.as_str()) {
        prefix.push('X');
    }
    prefix
}

/// What: Swap every `%name%` placeholder for a numbered marker.
///
/// Inputs:
/// - `text`: Source text about to be sent to the translator
///
/// Output:
/// - [`Protected`] holding the marked text and the placeholders in marker order
///
/// Details:
/// - Only identifier-like names count as placeholders, so "50% off %user%"
///   protects `%user%` and leaves the percent sign alone.
/// - Markers look like `__PH0__`; when the text already contains `__PH`, the
///   prefix is lengthened (`__PHX0__`, ...) until it cannot collide.
#[must_use]
pub fn protect(text: &str) -> Protected {
    let prefix = marker_prefix(text);
    let mut placeholders = Vec::new();
    let marked = replace_placeholders(text, |name| {
        if !is_placeholder_name(name) {
            return None;
        }
        placeholders.push(format!("%{name}%"));
        Some(format!(
            "{prefix}{}{MARKER_SUFFIX}",
            placeholders.len() - 1
        ))
    });
    Protected {
        text: marked,
        placeholders,
        prefix,
    }
}

/// What: Build [`Vars`] from a JSON object.
///
/// Inputs:
/// - `value`: JSON value, expected to be an object
///
/// Output:
/// - Substitutions for every scalar member
///
/// Details:
/// - Strings are taken verbatim; numbers and booleans use their JSON text.
/// - `null`, arrays and nested objects are skipped.
/// - Non-object input yields an empty map.
#[must_use]
pub fn vars_from_json(value: &Value) -> Vars {
    let Some(object) = value.as_object() else {
        return Vars::new();
    };
    object
        .iter()
        .filter_map(|(name, v)| {
            let text = match v {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => return None,
            };
            Some((name.clone(), text))
        })
        .collect()
}

//! Shared utilities for argument processing.

use lingo_t::i18n::{Vars, vars_from_json};

/// What: Determine the log level based on command-line arguments and environment variables.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level` argument.
/// - `LINGO_T_TRACE=1` enables TRACE level for cache and lookup diagnostics.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else if std::env::var("LINGO_T_TRACE").ok().as_deref() == Some("1") {
        "trace".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Parse a `NAME=VALUE` substitution.
///
/// Inputs:
/// - `raw`: Argument text.
///
/// Output:
/// - `Some((name, value))`, or `None` when there is no `=` or the name is empty.
///
/// Details:
/// - The name is trimmed; the value is kept verbatim so it may carry spaces.
pub fn parse_var_assignment(raw: &str) -> Option<(String, String)> {
    let (name, value) = raw.split_once('=')?;
    let name = name.trim().trim_matches('%');
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.to_string()))
}

/// What: Collect substitutions from `--vars-json` and repeated `--var` flags.
///
/// Inputs:
/// - `assignments`: Raw `NAME=VALUE` strings.
/// - `json`: Optional JSON object text.
///
/// Output:
/// - `Ok(Vars)`; `--var` entries override JSON entries with the same name.
///
/// # Errors
/// - Returns `Err` when the JSON cannot be parsed or an assignment is malformed.
pub fn collect_vars(assignments: &[String], json: Option<&str>) -> Result<Vars, String> {
    let mut vars = match json {
        Some(text) => {
            let value: serde_json::Value = serde_json::from_str(text)
                .map_err(|e| format!("Invalid --vars-json value: {e}"))?;
            if !value.is_object() {
                return Err("--vars-json must be a JSON object".to_string());
            }
            vars_from_json(&value)
        }
        None => Vars::new(),
    };
    for raw in assignments {
        let (name, value) = parse_var_assignment(raw)
            .ok_or_else(|| format!("Invalid --var '{raw}'. Expected NAME=VALUE"))?;
        vars.insert(name, value);
    }
    Ok(vars)
}

//! Pattern validation helpers.
//!
//! Text fields may declare a regex `pattern`. Patterns are compiled once and
//! cached for the lifetime of the program.

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use regex::Regex;

/// Process-wide cache of compiled patterns, keyed by pattern source.
fn pattern_cache() -> &'static RwLock<HashMap<String, Regex>> {
    static CACHE: OnceLock<RwLock<HashMap<String, Regex>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

fn compiled(pattern: &str) -> Result<Regex, regex::Error> {
    {
        let cache = pattern_cache()
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(regex) = cache.get(pattern) {
            return Ok(regex.clone());
        }
    }

    let regex = Regex::new(pattern)?;
    pattern_cache()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(pattern.to_string(), regex.clone());
    Ok(regex)
}

/// Check if a string matches a regex pattern.
///
/// An invalid pattern never matches; the problem is logged. Model declarations
/// are checked up front by [`ModelMeta::check`](crate::ModelMeta::check), so this
/// only happens for patterns that bypassed that check.
///
/// ```
/// use sermodel_core::matches_pattern;
///
/// assert!(matches_pattern("https://api.example.com", r"^https?://"));
/// assert!(!matches_pattern("ftp://example.com", r"^https?://"));
/// ```
pub fn matches_pattern(value: &str, pattern: &str) -> bool {
    match compiled(pattern) {
        Ok(regex) => regex.is_match(value),
        Err(e) => {
            tracing::warn!(
                pattern = pattern,
                error = %e,
                "Invalid field pattern, treating as non-match"
            );
            false
        }
    }
}

/// Returns an error message if the pattern is invalid, `None` if valid.
pub fn validate_pattern(pattern: &str) -> Option<String> {
    match compiled(pattern) {
        Ok(_) => None,
        Err(e) => Some(format!("invalid regex pattern: {e}")),
    }
}

//! Environment variable helpers shared by the binaries and config fallbacks.

use std::str::FromStr;

/// Read `key`, falling back to `default` when unset or blank.
pub fn var_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

/// Read and parse `key`; `None` when unset or unparsable.
pub fn var_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

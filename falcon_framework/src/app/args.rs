//! Start-up argument service
//!
//! Arguments take the form `key=value`. Surrounding quotes on the value are
//! stripped and a bare `key` maps to an empty value.

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::falcon_bail;

const SOURCE: &str = "falcon::args";

/// Host argument service
///
/// Parses the process arguments once at setup; lookups are valid until
/// shutdown.
pub trait Args {
    /// Parse `argv` (without the program name)
    fn setup(&mut self, argv: &[String]) -> Result<()>;

    fn shutdown(&mut self);

    fn value(&self, key: &str) -> Option<&str>;

    fn value_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.value(key).unwrap_or(default)
    }

    fn exists(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    /// `true` for the values "true", "yes" and "on"
    fn bool_value(&self, key: &str) -> bool {
        matches!(self.value(key), Some("true" | "yes" | "on"))
    }
}

/// Default [`Args`] implementation
#[derive(Debug, Default)]
pub struct KeyValueArgs {
    values: FxHashMap<String, String>,
}

impl KeyValueArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
            return inner;
        }
    }
    value
}

impl Args for KeyValueArgs {
    fn setup(&mut self, argv: &[String]) -> Result<()> {
        let mut values = FxHashMap::default();
        for arg in argv {
            let (key, value) = match arg.split_once('=') {
                Some((key, value)) => (key.trim(), strip_quotes(value.trim())),
                None => (arg.trim(), ""),
            };
            if key.is_empty() {
                falcon_bail!(InvalidArgument, SOURCE, "missing key name in '{}'", arg);
            }
            values.insert(key.to_string(), value.to_string());
        }
        self.values = values;
        Ok(())
    }

    fn shutdown(&mut self) {
        self.values.clear();
    }

    fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;

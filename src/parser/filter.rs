//! Exclude list for source files.
//!
//! Entries containing `*` are wildcards, everything else must match exactly.

use crate::utils::error::ParseError;
use regex::Regex;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct ExcludeFilter {
    exact: HashSet<String>,
    wildcards: Vec<Regex>,
}

impl ExcludeFilter {
    /// Build a filter, ignoring empty entries
    ///
    /// # Errors
    /// * `ParseError::InvalidPattern` - a wildcard cannot be compiled
    pub fn new<I, S>(patterns: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            if pattern.is_empty() {
                continue;
            }
            if pattern.contains('*') {
                filter.wildcards.push(wildcard_regex(pattern)?);
            } else {
                filter.exact.insert(pattern.to_string());
            }
        }

        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.wildcards.is_empty()
    }

    /// Is `item` excluded?
    pub fn excluded(&self, item: &str) -> bool {
        self.exact.contains(item) || self.wildcards.iter().any(|regex| regex.is_match(item))
    }

    /// Patterns in a printable form, for logging
    pub fn describe(&self) -> Vec<String> {
        let mut patterns: Vec<String> = self.exact.iter().cloned().collect();
        patterns.sort();
        patterns.extend(self.wildcards.iter().map(|regex| regex.as_str().to_string()));
        patterns
    }
}

/// `*` matches any run of characters; the match is anchored at the start only
fn wildcard_regex(pattern: &str) -> Result<Regex, ParseError> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Ok(Regex::new(&format!("^{}", body))?)
}

//! Word-list configuration for `reelguard-core`.
//!
//! The prohibited terms and their exceptions ship inside the library as an
//! embedded YAML document. They are never read from disk at runtime, which
//! keeps every verdict reproducible across hosts.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::ReelguardError;
use crate::normalizer::normalize;

/// The embedded default word lists.
const DEFAULT_WORDLISTS_YAML: &str = include_str!("../config/default_wordlists.yaml");

/// The two static word lists the filter compares tokens against.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WordLists {
    /// Words and fragments the filter detects. Stored as written; matching
    /// always happens on their normalized form.
    pub prohibited: Vec<String>,
    /// Legitimate words that contain a prohibited fragment and must not be flagged.
    pub exceptions: Vec<String>,
}

impl WordLists {
    /// Loads the word lists compiled into the library.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default word lists from embedded string...");
        let lists = Self::from_yaml_str(DEFAULT_WORDLISTS_YAML)
            .context("Failed to parse default word lists")?;

        debug!(
            "Loaded {} prohibited terms and {} exceptions.",
            lists.prohibited.len(),
            lists.exceptions.len()
        );
        Ok(lists)
    }

    /// Parses and validates word lists from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let lists: WordLists = serde_yml::from_str(yaml).map_err(ReelguardError::from)?;
        lists.validate()?;
        Ok(lists)
    }

    /// Rejects entries that could never match, or would match everything.
    ///
    /// An exception that normalizes to `""` would be a substring of every
    /// token and silently disable the embedded-term check, so it is refused
    /// rather than tolerated.
    pub fn validate(&self) -> Result<(), ReelguardError> {
        check_list("prohibited", &self.prohibited)?;
        check_list("exceptions", &self.exceptions)
    }
}

fn check_list(list_name: &'static str, entries: &[String]) -> Result<(), ReelguardError> {
    for (index, entry) in entries.iter().enumerate() {
        if entry.trim().is_empty() {
            return Err(ReelguardError::EmptyTerm(list_name, index));
        }
        if normalize(entry).is_empty() {
            return Err(ReelguardError::EmptyAfterNormalization(list_name, entry.clone()));
        }
    }
    Ok(())
}

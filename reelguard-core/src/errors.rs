//! errors.rs - Custom error types for the reelguard-core library.
//!
//! Only construction can fail: loading the embedded word lists and compiling
//! them into a matcher. The filter operations themselves are total.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All possible construction-time errors in `reelguard-core`.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReelguardError {
    #[error("Failed to parse word lists: {0}")]
    WordListParse(#[from] serde_yml::Error),

    #[error("Word list '{0}' entry {1} is empty")]
    EmptyTerm(&'static str, usize),

    #[error("Word list '{0}' entry '{1}' normalizes to an empty string")]
    EmptyAfterNormalization(&'static str, String),

    #[error("Failed to build term automaton for '{0}': {1}")]
    Automaton(&'static str, String),
}

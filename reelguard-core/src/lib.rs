// reelguard-core/src/lib.rs
//! # Reelguard Core Library
//!
//! `reelguard-core` screens user-generated text for prohibited language. It
//! sits in front of review submission and account registration, and offers
//! display-time masking for text that is already stored.
//!
//! The library is pure and stateless: the word lists ship embedded, are
//! compiled once, and every filter operation is a deterministic function of
//! its input. It never touches the network or the filesystem, and it is safe
//! to call from any number of threads at once.
//!
//! ## Modules
//!
//! * `config`: The embedded prohibited-term and exception lists (`WordLists`).
//! * `normalizer`: Canonicalizes text (case, accents, leet-speak, stretching, spacing).
//! * `matcher`: Decides whether one token is prohibited (`TermMatcher`).
//! * `filter`: The `ContentFilter` facade: detection, identifier validation, masking.
//! * `moderation`: Review and username screening with user-facing rejection messages.
//! * `redaction`: Log-safe rendering of flagged content.
//! * `errors`: Construction-time error types.
//!
//! ## Usage Example
//!
//! ```rust
//! use reelguard_core::{contains_prohibited_content, is_valid_identifier, mask_prohibited_content};
//!
//! assert!(contains_prohibited_content("what a load of sh1t"));
//! assert!(!contains_prohibited_content("an assessment of the classics"));
//!
//! assert!(is_valid_identifier("cool_user99"));
//! assert!(!is_valid_identifier("user name"));
//!
//! assert_eq!(mask_prohibited_content("shit happens"), "s**t happens");
//! ```
//!
//! ## Error Handling
//!
//! Only construction can fail (`anyhow::Result`, with `ReelguardError` for
//! the specific causes). Detection, validation and masking are total.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod errors;
pub mod filter;
pub mod matcher;
pub mod moderation;
pub mod normalizer;
pub mod redaction;

use std::borrow::Cow;

pub use config::WordLists;
pub use errors::ReelguardError;
pub use filter::{mask_token, ContentFilter, IdentifierRejection, ProhibitedToken, MASK_CHAR};
pub use matcher::{MatchKind, TermMatcher, MIN_EMBEDDED_TERM_LEN, MIN_TOKEN_CHARS};
pub use moderation::{
    screen_review, screen_username, screen_username_with, RatingSummary, ReviewDraft,
    ReviewRejection, UsernameRejection, MAX_RATING, MIN_RATING,
};
pub use normalizer::{normalize, SUBSTITUTIONS};
pub use redaction::{log_prohibited_token_debug, redact_sensitive};

/// Returns `true` if `text` contains prohibited content, using the shared filter.
pub fn contains_prohibited_content<'a>(text: impl Into<Option<&'a str>>) -> bool {
    ContentFilter::shared().contains_prohibited_content(text)
}

/// Returns `true` if `name` is an acceptable identifier, using the shared filter.
pub fn is_valid_identifier<'a>(name: impl Into<Option<&'a str>>) -> bool {
    ContentFilter::shared().is_valid_identifier(name)
}

/// Masks prohibited tokens in `text`, using the shared filter.
pub fn mask_prohibited_content(text: &str) -> Cow<'_, str> {
    ContentFilter::shared().mask_prohibited_content(text)
}

/// Returns `true` if a single raw token is prohibited, using the shared filter.
pub fn is_prohibited(token: &str) -> bool {
    ContentFilter::shared().matcher().is_prohibited(token)
}

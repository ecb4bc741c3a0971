// File: reelguard-core/src/moderation.rs
//! The two flows that consult the content filter before anything is stored:
//! review submission and account registration.
//!
//! Both return a rejection whose `Display` text is the message shown to the
//! user. Neither persists, logs or retries anything; callers decide what a
//! rejection means for their request.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filter::{ContentFilter, IdentifierRejection};

/// Lowest star rating a review may carry.
pub const MIN_RATING: u8 = 1;
/// Highest star rating a review may carry.
pub const MAX_RATING: u8 = 5;

/// A review as submitted, before it is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    /// Star rating, 1 to 5.
    pub rating: u8,
    /// Free-text body. May be empty.
    pub content: String,
}

/// Why a review was turned away.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewRejection {
    #[error("Rating must be between 1 and 5 stars, got {0}")]
    RatingOutOfRange(u8),

    #[error("Your review contains inappropriate language. Please revise it.")]
    InappropriateLanguage,
}

/// Why a proposed username was turned away.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsernameRejection {
    #[error("Username is required")]
    Required,

    #[error("Username must be at least 3 characters long")]
    TooShort,

    #[error("Username contains inappropriate content")]
    InappropriateContent,

    #[error("Username may only contain letters, numbers, underscores, dots and hyphens")]
    InvalidCharacters,
}

impl From<IdentifierRejection> for UsernameRejection {
    fn from(rejection: IdentifierRejection) -> Self {
        match rejection {
            IdentifierRejection::TooShort => UsernameRejection::TooShort,
            IdentifierRejection::InappropriateContent => UsernameRejection::InappropriateContent,
            IdentifierRejection::InvalidCharacters => UsernameRejection::InvalidCharacters,
        }
    }
}

impl ReviewDraft {
    pub fn new(rating: u8, content: impl Into<String>) -> Self {
        Self { rating, content: content.into() }
    }

    /// Checks the draft against `filter`. Nothing should be stored on `Err`.
    pub fn screen(&self, filter: &ContentFilter) -> Result<(), ReviewRejection> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ReviewRejection::RatingOutOfRange(self.rating));
        }
        if filter.contains_prohibited_content(self.content.as_str()) {
            return Err(ReviewRejection::InappropriateLanguage);
        }
        Ok(())
    }
}

/// Screens a review with the shared filter.
pub fn screen_review(draft: &ReviewDraft) -> Result<(), ReviewRejection> {
    draft.screen(ContentFilter::shared())
}

/// Screens a proposed username with `filter`, reporting the specific reason
/// for a rejection.
pub fn screen_username_with(filter: &ContentFilter, name: &str) -> Result<(), UsernameRejection> {
    if name.trim().is_empty() {
        return Err(UsernameRejection::Required);
    }
    filter.validate_identifier(name)?;
    Ok(())
}

/// Screens a proposed username with the shared filter.
pub fn screen_username(name: &str) -> Result<(), UsernameRejection> {
    screen_username_with(ContentFilter::shared(), name)
}

/// Average star rating over a movie's reviews.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: usize,
}

impl RatingSummary {
    /// Returns `None` when there are no ratings to average.
    pub fn from_ratings(ratings: &[u8]) -> Option<Self> {
        if ratings.is_empty() {
            return None;
        }
        let sum: u64 = ratings.iter().map(|&r| u64::from(r)).sum();
        Some(Self {
            average: sum as f64 / ratings.len() as f64,
            count: ratings.len(),
        })
    }
}

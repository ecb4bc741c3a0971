//! Helpers for mentioning flagged text in debug logs without leaking it.
//!
//! Flagged tokens are user-generated and often offensive, so they are
//! redacted in logs unless `REELGUARD_ALLOW_DEBUG_CONTENT=true` is set.

use lazy_static::lazy_static;
use log::debug;

use crate::filter::ProhibitedToken;

lazy_static! {
    /// Whether raw flagged content may appear in debug logs. Read once.
    static ref CONTENT_DEBUG_ALLOWED: bool = {
        std::env::var("REELGUARD_ALLOW_DEBUG_CONTENT")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let chars = s.chars().count();
    if chars <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", chars)
    }
}

fn get_loggable_content(content: &str) -> String {
    if *CONTENT_DEBUG_ALLOWED {
        content.to_string()
    } else {
        redact_sensitive(content)
    }
}

pub fn log_prohibited_token_debug(module_path: &str, source_id: &str, token: &ProhibitedToken) {
    debug!(
        "{} Flagged token in '{}' at {}..{} ({:?}): '{}'",
        module_path,
        source_id,
        token.start,
        token.end,
        token.kind,
        get_loggable_content(&token.token)
    );
}

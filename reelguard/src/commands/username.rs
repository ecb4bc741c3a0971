// reelguard/src/commands/username.rs
//! `reelguard username`: the registration check, from the shell.

use log::debug;

use reelguard_core::{redact_sensitive, screen_username_with, ContentFilter};

use crate::commands::{error_msg, success_msg};

/// Returns `true` when `name` would be accepted at registration.
pub fn run_username(filter: &ContentFilter, name: &str, quiet: bool) -> bool {
    match screen_username_with(filter, name) {
        Ok(()) => {
            if !quiet {
                success_msg(format!("'{}' is a valid username.", name));
            }
            true
        }
        Err(rejection) => {
            debug!("Rejected username {}: {:?}", redact_sensitive(name), rejection);
            // Rejection reasons are printed even with --quiet.
            error_msg(rejection.to_string());
            false
        }
    }
}

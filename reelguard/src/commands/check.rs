// reelguard/src/commands/check.rs
//! `reelguard check`: a yes/no verdict suitable for scripts and hooks.

use anyhow::Result;
use log::info;
use std::path::Path;

use reelguard_core::ContentFilter;

use crate::commands::{success_msg, warn_msg};
use crate::utils::input::{read_input, source_id};

/// Returns `true` when the input is clean.
pub fn run_check(filter: &ContentFilter, input_file: Option<&Path>, quiet: bool) -> Result<bool> {
    let text = read_input(input_file)?;
    let source = source_id(input_file);
    let clean = !filter.contains_prohibited_content(text.as_str());
    info!("Checked {} ({} bytes): clean={}", source, text.len(), clean);

    if !quiet {
        if clean {
            success_msg(format!("No prohibited content found in {}.", source));
        } else {
            warn_msg(format!("Prohibited content found in {}.", source));
        }
    }
    Ok(clean)
}

// reelguard/src/commands/scan.rs
//! `reelguard scan`: reports every flagged token with its byte span.
//!
//! The human-readable report goes to stdout one token per line; `--json`
//! swaps it for a single `ScanReport` document.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::PathBuf;

use reelguard_core::{log_prohibited_token_debug, ContentFilter, ProhibitedToken};

use crate::commands::{success_msg, warn_msg};
use crate::utils::input::{read_input, source_id};

/// Options for the `scan` command.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub input_file: Option<PathBuf>,
    pub json: bool,
    pub fail_over_threshold: Option<usize>,
    pub quiet: bool,
}

/// Result of scanning one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub source: String,
    pub flagged: usize,
    pub tokens: Vec<ProhibitedToken>,
}

impl ScanReport {
    /// `true` when the number of flagged tokens exceeds `threshold`.
    /// Without a threshold, any flagged token counts as a failure.
    pub fn exceeds(&self, threshold: Option<usize>) -> bool {
        match threshold {
            Some(limit) => self.flagged > limit,
            None => self.flagged > 0,
        }
    }
}

/// Scans `text` and builds a report for it.
pub fn scan_text(filter: &ContentFilter, text: &str, source: &str) -> ScanReport {
    let tokens = filter.find_prohibited_tokens(text);
    for token in &tokens {
        log_prohibited_token_debug(module_path!(), source, token);
    }
    ScanReport {
        source: source.to_string(),
        flagged: tokens.len(),
        tokens,
    }
}

/// Writes the human-readable form of `report`.
pub fn write_report<W: Write>(writer: &mut W, report: &ScanReport) -> io::Result<()> {
    for token in &report.tokens {
        writeln!(
            writer,
            "{}:{}..{}\t{:?}\t{}",
            report.source, token.start, token.end, token.kind, token.token
        )?;
    }
    Ok(())
}

/// Runs the scan. Returns `true` when the input passes the threshold.
pub fn run_scan(filter: &ContentFilter, opts: &ScanOptions) -> Result<bool> {
    let source = source_id(opts.input_file.as_deref());
    info!("Starting scan of {}.", source);
    let text = read_input(opts.input_file.as_deref())?;
    let report = scan_text(filter, &text, &source);
    debug!("Scan of {} flagged {} token(s).", source, report.flagged);

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if opts.json {
        serde_json::to_writer_pretty(&mut writer, &report).context("Failed to serialize scan report")?;
        writeln!(writer)?;
    } else {
        write_report(&mut writer, &report).context("Failed to write scan report")?;
    }

    let failed = report.exceeds(opts.fail_over_threshold);
    if !opts.quiet {
        match (report.flagged, failed) {
            (0, _) => success_msg(format!("No prohibited content found in {}.", source)),
            (n, true) => warn_msg(format!("{} prohibited token(s) found in {}.", n, source)),
            (n, false) => success_msg(format!(
                "{} prohibited token(s) found in {}, within the allowed threshold.",
                n, source
            )),
        }
    }
    Ok(!failed)
}

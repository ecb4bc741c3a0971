// reelguard/src/main.rs
//! Reelguard entry point.
//!
//! Exit codes: `0` clean or accepted, `1` prohibited content found or
//! username rejected, `2` operational error.

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use std::process::ExitCode;

use reelguard::cli::{Cli, Commands};
use reelguard::commands::{self, error_msg};
use reelguard::commands::mask::MaskOptions;
use reelguard::commands::scan::ScanOptions;
use reelguard::logger;
use reelguard_core::ContentFilter;

const EXIT_FLAGGED: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FLAGGED),
        Err(e) => {
            error_msg(format!("{:#}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Dispatches the parsed command. `Ok(false)` means the input was flagged.
fn run(cli: Cli) -> Result<bool> {
    let filter = ContentFilter::with_default_lists().context("Failed to build the content filter")?;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Mask(cmd) => {
            let opts = MaskOptions {
                input_file: cmd.input.input_file,
                output_path: cmd.output,
                line_buffered: cmd.line_buffered,
                quiet,
            };
            commands::mask::run_mask(&filter, &opts)?;
            Ok(true)
        }
        Commands::Check(input) => commands::check::run_check(&filter, input.input_file.as_deref(), quiet),
        Commands::Scan(cmd) => {
            let opts = ScanOptions {
                input_file: cmd.input.input_file,
                json: cmd.json,
                fail_over_threshold: cmd.fail_over_threshold,
                quiet,
            };
            commands::scan::run_scan(&filter, &opts)
        }
        Commands::Username { name } => Ok(commands::username::run_username(&filter, &name, quiet)),
        Commands::Normalize { text } => {
            commands::normalize::run_normalize(&text)?;
            Ok(true)
        }
    }
}

// reelguard/src/cli.rs
//! This file defines the command-line interface (CLI) for the reelguard application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "reelguard",
    author = "The Final Reel",
    version = env!("CARGO_PKG_VERSION"),
    about = "Screen and mask prohibited language in reviews and usernames",
    long_about = "Reelguard checks user-generated text against a built-in list of prohibited terms. It sees through capitals, accents, leet-speak, stretched letters and spaced-out spelling, honors a list of legitimate exceptions, and can mask flagged words while leaving the layout of the text untouched.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `reelguard` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Masks prohibited words in a file or stdin, keeping layout intact.
    #[command(about = "Mask prohibited words in a file or stdin, keeping layout intact.")]
    Mask(MaskCommand),

    /// Exits non-zero if the input contains prohibited content.
    #[command(about = "Exit non-zero if the input contains prohibited content.")]
    Check(InputArgs),

    /// Lists every flagged token with its byte offsets.
    #[command(about = "List every flagged token with its byte offsets.")]
    Scan(ScanCommand),

    /// Screens a proposed username and explains any rejection.
    #[command(about = "Screen a proposed username and explain any rejection.")]
    Username {
        /// The username to screen.
        #[arg(value_name = "NAME", help = "The username to screen.")]
        name: String,
    },

    /// Prints the normalized form of a text, as the matcher sees it.
    #[command(about = "Print the normalized form of a text, as the matcher sees it.")]
    Normalize {
        /// The text to normalize.
        #[arg(value_name = "TEXT", help = "The text to normalize.")]
        text: String,
    },
}

/// Where to read text from.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,
}

/// Arguments for the `mask` command.
#[derive(Args, Debug, Clone)]
pub struct MaskCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write masked output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Process input line by line (useful for streaming data from pipes).
    #[arg(long = "line-buffered", help = "Process input line by line (useful for streaming data from pipes).")]
    pub line_buffered: bool,
}

/// Arguments for the `scan` command.
#[derive(Args, Debug, Clone)]
pub struct ScanCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the scan report as JSON to stdout.
    #[arg(long = "json", help = "Print the scan report as JSON to stdout.")]
    pub json: bool,

    /// Exit with a non-zero code if more than N tokens are flagged.
    #[arg(
        long = "fail-over-threshold",
        value_name = "N",
        env = "REELGUARD_FAIL_OVER_THRESHOLD",
        help = "Exit with a non-zero code if more than N tokens are flagged (default: any)."
    )]
    pub fail_over_threshold: Option<usize>,
}

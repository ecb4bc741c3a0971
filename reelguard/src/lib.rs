// reelguard/src/lib.rs
//! # Reelguard CLI Application
//!
//! Command-line front end for `reelguard-core`: masks, checks and scans text
//! for prohibited language, and screens proposed usernames.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;

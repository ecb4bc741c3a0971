// reelguard/src/logger.rs
//! Logger setup for the reelguard binary.
//!
//! Honors `RUST_LOG` (default `warn`). An explicit level from the command
//! line wins over the environment. Logs always go to stderr so stdout stays
//! clean for masked text and reports.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).target(Target::Stderr);
    // A logger may already be installed when running under tests.
    let _ = builder.try_init();
}

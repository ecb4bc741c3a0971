// reelguard/src/commands/normalize.rs
//! `reelguard normalize`: shows the canonical form the matcher works on.

use anyhow::Result;
use std::io::{self, Write};

use reelguard_core::normalize;

pub fn run_normalize(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", normalize(text))?;
    Ok(())
}

// reelguard/src/utils/input.rs
//! Input sources shared by the commands: a named file or stdin.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Human-readable name of the input, used in logs and reports.
pub fn source_id(input_file: Option<&Path>) -> String {
    input_file.map_or_else(|| "stdin".to_string(), |p| p.display().to_string())
}

/// Opens the input for buffered reading.
pub fn open_input(input_file: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match input_file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Reads the whole input into memory.
pub fn read_input(input_file: Option<&Path>) -> Result<String> {
    let mut text = String::new();
    open_input(input_file)?
        .read_to_string(&mut text)
        .with_context(|| format!("Failed to read input from {}", source_id(input_file)))?;
    Ok(text)
}

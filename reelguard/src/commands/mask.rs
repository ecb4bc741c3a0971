// reelguard/src/commands/mask.rs
//! `reelguard mask`: display-time masking of stored text.
//!
//! Whitespace, punctuation and line breaks pass through untouched; only the
//! interior letters of flagged tokens are replaced.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io::{self, BufRead, BufWriter, Read, Write};
use std::path::PathBuf;

use reelguard_core::ContentFilter;

use crate::commands::info_msg;
use crate::utils::input::{open_input, source_id};

/// Options for the `mask` command.
#[derive(Debug, Clone, Default)]
pub struct MaskOptions {
    pub input_file: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub line_buffered: bool,
    pub quiet: bool,
}

/// Masks the configured input and writes it to the configured output.
pub fn run_mask(filter: &ContentFilter, opts: &MaskOptions) -> Result<()> {
    info!("Starting mask operation on {}.", source_id(opts.input_file.as_deref()));
    let reader = open_input(opts.input_file.as_deref())?;

    let masked_lines = match &opts.output_path {
        Some(path) => {
            if !opts.quiet {
                info_msg(format!("Writing masked content to file: {}", path.display()));
            }
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            let n = mask_stream(filter, reader, &mut writer, opts.line_buffered)?;
            writer.flush().context("Failed to flush output file")?;
            n
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            mask_stream(filter, reader, &mut writer, opts.line_buffered)?
        }
    };

    debug!("Mask operation changed {} line(s).", masked_lines);
    Ok(())
}

/// Copies `reader` to `writer`, masking prohibited tokens. Returns the number
/// of lines that were altered.
///
/// In line-buffered mode each line is masked and flushed as soon as it is
/// read; otherwise the whole input is read first. Line by line, a word
/// spelled out across a line break ("f u" then "c k") is never joined, so it
/// passes through unmasked where whole-input mode would mask it.
pub fn mask_stream<R: BufRead, W: Write>(
    filter: &ContentFilter,
    mut reader: R,
    writer: &mut W,
    line_buffered: bool,
) -> Result<usize> {
    let mut altered = 0;
    if line_buffered {
        let mut line = String::new();
        loop {
            line.clear();
            let read = reader.read_line(&mut line).context("Failed to read input line")?;
            if read == 0 {
                break;
            }
            let masked = filter.mask_prohibited_content(&line);
            if masked != line.as_str() {
                altered += 1;
            }
            writer.write_all(masked.as_bytes()).context("Failed to write masked line")?;
            writer.flush().context("Failed to flush output")?;
        }
    } else {
        let mut text = String::new();
        reader.read_to_string(&mut text).context("Failed to read input")?;
        let masked = filter.mask_prohibited_content(&text);
        altered = masked
            .lines()
            .zip(text.lines())
            .filter(|(after, before)| after != before)
            .count();
        writer.write_all(masked.as_bytes()).context("Failed to write masked output")?;
    }
    Ok(altered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use test_log::test;

    #[test]
    fn test_mask_stream_whole_input() -> Result<()> {
        let mut out = Vec::new();
        let altered = mask_stream(
            ContentFilter::shared(),
            Cursor::new("great film\nbut the ending was shit\n"),
            &mut out,
            false,
        )?;
        assert_eq!(String::from_utf8(out)?, "great film\nbut the ending was s**t\n");
        assert_eq!(altered, 1);
        Ok(())
    }

    #[test]
    fn test_mask_stream_line_buffered_keeps_line_endings() -> Result<()> {
        let mut out = Vec::new();
        let altered = mask_stream(
            ContentFilter::shared(),
            Cursor::new("bitch\r\nclean line\nno trailing newline damn"),
            &mut out,
            true,
        )?;
        assert_eq!(
            String::from_utf8(out)?,
            "b***h\r\nclean line\nno trailing newline d**n"
        );
        assert_eq!(altered, 2);
        Ok(())
    }

    #[test]
    fn test_spelled_out_word_across_lines() -> Result<()> {
        let input = "f u\nc k\n";

        let mut whole = Vec::new();
        mask_stream(ContentFilter::shared(), Cursor::new(input), &mut whole, false)?;
        assert_eq!(String::from_utf8(whole)?, "f *\n* k\n");

        let mut by_line = Vec::new();
        let altered = mask_stream(ContentFilter::shared(), Cursor::new(input), &mut by_line, true)?;
        assert_eq!(String::from_utf8(by_line)?, input);
        assert_eq!(altered, 0);
        Ok(())
    }

    #[test]
    fn test_mask_stream_empty_input() -> Result<()> {
        let mut out = Vec::new();
        assert_eq!(mask_stream(ContentFilter::shared(), Cursor::new(""), &mut out, true)?, 0);
        assert!(out.is_empty());
        Ok(())
    }
}

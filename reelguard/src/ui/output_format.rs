// reelguard/src/ui/output_format.rs
//! Styled status lines for stderr.
//!
//! Colors are only applied when the caller says the stream supports them,
//! so piped output and test captures stay plain.

use owo_colors::OwoColorize;
use std::io::{self, Write};

fn write_line<W: Write>(writer: &mut W, prefix: &str, styled_prefix: String, msg: &str, enable_colors: bool) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{} {}", styled_prefix, msg)
    } else {
        writeln!(writer, "{} {}", prefix, msg)
    }
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, enable_colors: bool) -> io::Result<()> {
    write_line(writer, "[info]", "[info]".cyan().to_string(), msg, enable_colors)
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, enable_colors: bool) -> io::Result<()> {
    write_line(writer, "[ok]", "[ok]".green().bold().to_string(), msg, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, enable_colors: bool) -> io::Result<()> {
    write_line(writer, "[warn]", "[warn]".yellow().to_string(), msg, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, enable_colors: bool) -> io::Result<()> {
    write_line(writer, "[error]", "[error]".red().bold().to_string(), msg, enable_colors)
}

//! Parse SRT, WebVTT and SBV caption files into ordered caption records.
//!
//! Timestamps are carried as text in the syntax of the source file.

mod blocks;
pub mod caption;
pub mod error;
pub mod format;
mod sequential;
pub mod subs;

pub use caption::Caption;
pub use error::{Error, Result};
pub use format::Format;
pub use subs::{parse_file, parse_str, read_lines, split_lines};

/// Parses already decoded lines (line terminators stripped) as `format`.
pub fn parse_lines<S: AsRef<str>>(format: Format, lines: &[S]) -> Result<Vec<Caption>> {
    format.parse(lines)
}

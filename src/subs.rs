//! Reading caption files into lines and parsing them.
use anyhow::Context;
use std::fs;
use std::path::Path;

use crate::{
    caption::Caption,
    error::{Error, Result},
    format::Format,
};

const BOM: char = '\u{FEFF}';

/// Splits decoded file contents into lines with trailing whitespace removed.
///
/// `\n`, `\r\n` and a bare `\r` all end a line.
pub fn split_lines(content: &str) -> Result<Vec<String>> {
    let normalized = content
        .strip_prefix(BOM)
        .unwrap_or(content)
        .replace("\r\n", "\n")
        .replace('\r', "\n");
    let lines: Vec<String> = normalized
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect();

    if lines.is_empty() {
        return Err(Error::empty_file());
    }
    Ok(lines)
}

pub fn read_lines(path: impl AsRef<Path>) -> anyhow::Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read caption file at '{}'", path.display()))?;
    Ok(split_lines(&content)?)
}

pub fn parse_str(format: Format, content: &str) -> Result<Vec<Caption>> {
    format.parse(&split_lines(content)?)
}

/// Parses a caption file, picking the format from its extension unless one is given.
pub fn parse_file(path: impl AsRef<Path>, format: Option<Format>) -> anyhow::Result<Vec<Caption>> {
    let path = path.as_ref();
    let format = match format.or_else(|| Format::from_path(path)) {
        Some(format) => format,
        None => {
            let ext = path
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_default();
            return Err(Error::UnknownFormat(ext))
                .with_context(|| format!("Cannot tell the caption format of '{}'", path.display()));
        }
    };

    let lines = read_lines(path)?;
    format
        .parse(&lines)
        .with_context(|| format!("Failed to parse '{}' as {}", path.display(), format))
}

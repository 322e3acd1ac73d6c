//! Per-format parsing policy: timing line syntax, skip rules and file signatures.
use std::{fmt, path::Path, str::FromStr};

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::{
    blocks,
    caption::Caption,
    error::{Error, Result},
    sequential,
};

lazy_static! {
    static ref SRT_TIMEFRAME_RE: Regex =
        Regex::new(r"^\s*(\d+:\d{2}:\d{2},\d{3})\s*-->\s*(\d+:\d{2}:\d{2},\d{3})").unwrap();
    static ref WEBVTT_TIMEFRAME_RE: Regex = Regex::new(
        r"^\s*((?:\d+:)?\d{2}:\d{2}\.\d{3})\s*-->\s*((?:\d+:)?\d{2}:\d{2}\.\d{3})"
    )
    .unwrap();
    static ref SBV_TIMEFRAME_RE: Regex =
        Regex::new(r"^\s*(\d+:\d{2}:\d{2}\.\d{3}),(\d+:\d{2}:\d{2}\.\d{3})").unwrap();
}

const ARROW: &str = "-->";
const WEBVTT_SIGNATURE: &str = "WEBVTT";
const SRT_FIRST_INDEX: &str = "1";

/// A timing line that has the shape of one but does not match the format's pattern.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid time format")]
pub struct InvalidTimeframe;

/// The supported caption formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// SubRip (`.srt`).
    Srt,
    /// Web Video Text Tracks (`.vtt`).
    WebVtt,
    /// YouTube SubViewer (`.sbv`).
    Sbv,
}

impl Format {
    pub fn name(self) -> &'static str {
        match self {
            Format::Srt => "srt",
            Format::WebVtt => "webvtt",
            Format::Sbv => "sbv",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "srt" => Some(Format::Srt),
            "vtt" => Some(Format::WebVtt),
            "sbv" => Some(Format::Sbv),
            _ => None,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Pattern whose two capture groups are the raw start and end timestamps.
    pub fn timeframe_pattern(self) -> &'static Regex {
        match self {
            Format::Srt => &*SRT_TIMEFRAME_RE,
            Format::WebVtt => &*WEBVTT_TIMEFRAME_RE,
            Format::Sbv => &*SBV_TIMEFRAME_RE,
        }
    }

    pub fn parse_timeframe(
        self,
        line: &str,
    ) -> std::result::Result<(String, String), InvalidTimeframe> {
        let caps = self
            .timeframe_pattern()
            .captures(line)
            .ok_or(InvalidTimeframe)?;
        Ok((caps[1].to_string(), caps[2].to_string()))
    }

    /// Whether `line` declares a timing pair.
    ///
    /// For the arrow formats this only looks for the arrow token, so that a
    /// garbled timing line is reported instead of being read as caption text.
    pub fn is_timeframe_line(self, line: &str) -> bool {
        match self {
            Format::Srt | Format::WebVtt => line.contains(ARROW),
            Format::Sbv => self.timeframe_pattern().is_match(line),
        }
    }

    /// Whether `line` (0-based `index`) carries no caption data and should be ignored.
    pub fn should_skip_line(self, line: &str, _index: usize, caption: Option<&Caption>) -> bool {
        match self {
            // sequence numbers only appear between captions, in any script's digits
            Format::Srt => {
                caption.is_none() && !line.is_empty() && line.chars().all(char::is_numeric)
            }
            Format::WebVtt | Format::Sbv => false,
        }
    }

    /// Checks the file signature before any caption is parsed.
    pub fn validate<S: AsRef<str>>(self, lines: &[S]) -> Result<()> {
        let line = |i: usize| -> Option<&str> { lines.get(i).map(|l| l.as_ref()) };
        let valid = match self {
            Format::Srt => {
                line(0) == Some(SRT_FIRST_INDEX)
                    && line(1).is_some_and(|l| self.timeframe_pattern().is_match(l))
            }
            Format::WebVtt => line(0).is_some_and(|l| l.starts_with(WEBVTT_SIGNATURE)),
            Format::Sbv => line(0).is_some_and(|l| self.timeframe_pattern().is_match(l)),
        };
        if valid {
            Ok(())
        } else {
            Err(Error::invalid_format())
        }
    }

    /// Validates the signature and runs the engine this format uses.
    pub fn parse<S: AsRef<str>>(self, lines: &[S]) -> Result<Vec<Caption>> {
        if lines.is_empty() {
            return Err(Error::empty_file());
        }
        self.validate(lines)?;
        log::debug!("parsing {} lines as {}", lines.len(), self);

        let captions = match self {
            Format::Srt | Format::Sbv => sequential::parse(self, lines)?,
            Format::WebVtt => blocks::parse(self, lines)?,
        };
        log::debug!("parsed {} {} captions", captions.len(), self);
        Ok(captions)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "srt" => Ok(Format::Srt),
            "vtt" | "webvtt" => Ok(Format::WebVtt),
            "sbv" => Ok(Format::Sbv),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

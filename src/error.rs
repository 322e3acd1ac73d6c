//! Errors raised while reading and parsing caption files.
use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The file as a whole is unusable (empty, wrong signature, header too short).
    #[error("{0}")]
    MalformedFile(String),
    /// A structural problem found while scanning lines or blocks.
    #[error("{message} in line {line}")]
    MalformedCaption { message: String, line: usize },
    #[error("unknown caption format '{0}'")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn empty_file() -> Self {
        Error::MalformedFile("the file is empty".into())
    }

    pub(crate) fn invalid_format() -> Self {
        Error::MalformedFile("the file does not have a valid format".into())
    }

    pub(crate) fn caption(message: impl Into<String>, line: usize) -> Self {
        Error::MalformedCaption {
            message: message.into(),
            line,
        }
    }

    /// 1-based line number for caption errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::MalformedCaption { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Attaches a 1-based line number to a lower-level failure, keeping its message as the prefix.
pub(crate) trait AtLine<T> {
    fn at_line(self, line: usize) -> Result<T>;
}

impl<T, E: Display> AtLine<T> for std::result::Result<T, E> {
    fn at_line(self, line: usize) -> Result<T> {
        self.map_err(|e| Error::caption(e.to_string(), line))
    }
}

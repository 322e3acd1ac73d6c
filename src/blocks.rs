//! Block based parsing for WebVTT.
//!
//! The file is cut into blank-line separated blocks; the first one is the
//! signature header. Every other block is either a cue, a `NOTE` comment, or an
//! error.
use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    caption::Caption,
    error::{AtLine, Error, Result},
    format::Format,
};

lazy_static! {
    static ref COMMENT_RE: Regex = Regex::new(r"^NOTE(?:\s.+|$)").unwrap();
}

/// A run of non-blank lines.
#[derive(Debug, PartialEq, Eq)]
struct Block<'a> {
    /// 1-based line number of the first line in the block.
    line_number: usize,
    lines: Vec<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Cue,
    Comment,
    Malformed,
}

fn segment<S: AsRef<str>>(lines: &[S]) -> Vec<Block<'_>> {
    let mut blocks = vec![];
    let mut current: Option<Block> = None;

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if line.is_empty() {
            blocks.extend(current.take());
        } else {
            current
                .get_or_insert_with(|| Block {
                    line_number: index + 1,
                    lines: vec![],
                })
                .lines
                .push(line);
        }
    }
    blocks.extend(current);

    // the signature block carries no cues
    blocks.into_iter().skip(1).collect()
}

fn classify(format: Format, block: &Block) -> BlockKind {
    if block
        .lines
        .iter()
        .take(2)
        .any(|line| format.is_timeframe_line(line))
    {
        BlockKind::Cue
    } else if block
        .lines
        .first()
        .is_some_and(|line| COMMENT_RE.is_match(line))
    {
        BlockKind::Comment
    } else {
        BlockKind::Malformed
    }
}

fn build_cue(format: Format, block: &Block) -> Result<Caption> {
    let mut caption = Caption::default();
    let mut timing = None;

    for (offset, line) in block.lines.iter().enumerate() {
        let line_number = block.line_number + offset;
        if format.is_timeframe_line(line) {
            if timing.is_some() {
                return Err(Error::caption("--> found", line_number));
            }
            timing = Some(format.parse_timeframe(line).at_line(line_number)?);
        } else if offset == 0 {
            caption.identifier = Some(line.to_string());
        } else {
            caption.add_line(*line);
        }
    }

    let (start, end) =
        timing.ok_or_else(|| Error::caption("missing timing cue", block.line_number + 1))?;
    caption.start = start;
    caption.end = end;
    Ok(caption)
}

pub(crate) fn parse<S: AsRef<str>>(format: Format, lines: &[S]) -> Result<Vec<Caption>> {
    let blocks = segment(lines);
    log::debug!("found {} blocks after the header", blocks.len());

    let mut captions = Vec::with_capacity(blocks.len());
    for block in &blocks {
        match classify(format, block) {
            BlockKind::Cue => {
                let caption = build_cue(format, block)?;
                log::trace!("caption {} --> {}", caption.start, caption.end);
                captions.push(caption);
            }
            BlockKind::Comment => {
                log::trace!("skipping comment in line {}", block.line_number);
            }
            BlockKind::Malformed if block.lines.len() == 1 => {
                return Err(Error::caption(
                    "standalone cue identifier",
                    block.line_number,
                ));
            }
            BlockKind::Malformed => {
                return Err(Error::caption("missing timing cue", block.line_number + 1));
            }
        }
    }

    Ok(captions)
}

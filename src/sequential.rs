//! Single pass, line by line parsing for formats where every caption is a
//! timing line followed by text and terminated by a blank line (SRT, SBV).
use crate::{
    caption::Caption,
    error::{AtLine, Error, Result},
    format::Format,
};

pub(crate) fn parse<S: AsRef<str>>(format: Format, lines: &[S]) -> Result<Vec<Caption>> {
    let mut captions = vec![];
    let mut current: Option<Caption> = None;

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let line_number = index + 1;

        if format.is_timeframe_line(line) {
            let (start, end) = format.parse_timeframe(line).at_line(line_number)?;
            // an unterminated caption is overwritten, not flushed
            if let Some(dropped) = current.replace(Caption::new(start, end)) {
                log::debug!(
                    "dropping unterminated caption {} --> {} before line {}",
                    dropped.start,
                    dropped.end,
                    line_number
                );
            }
        } else if format.should_skip_line(line, index, current.as_ref()) {
            continue;
        } else if !line.is_empty() {
            match current.as_mut() {
                Some(caption) => caption.add_line(line),
                None => return Err(Error::caption("caption missing timeframe", line_number)),
            }
        } else if let Some(caption) = current.take() {
            if caption.lines.is_empty() {
                return Err(Error::caption("caption missing text", line_number));
            }
            log::trace!("caption {} --> {}", caption.start, caption.end);
            captions.push(caption);
        }
    }

    // files are not required to end with a blank line
    if let Some(caption) = current.filter(|c| !c.lines.is_empty()) {
        log::trace!("caption {} --> {}", caption.start, caption.end);
        captions.push(caption);
    }

    Ok(captions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn srt(lines: &[&str]) -> Result<Vec<Caption>> {
        Format::Srt.parse(lines)
    }

    #[test]
    fn single_srt_caption() {
        let captions = srt(&["1", "00:00:01,000 --> 00:00:02,000", "Hello", ""]).unwrap();
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].start, "00:00:01,000");
        assert_eq!(captions[0].end, "00:00:02,000");
        assert_eq!(captions[0].lines, vec!["Hello"]);
        assert_eq!(captions[0].identifier, None);
    }

    #[test]
    fn multiple_srt_captions_keep_line_order() {
        let captions = srt(&[
            "1",
            "00:00:01,000 --> 00:00:04,000",
            "Hello, world!",
            "",
            "2",
            "00:00:05,000 --> 00:00:07,000",
            "Third subtitle line 1.",
            "Third subtitle line 2.",
            "",
            "",
            "3",
            "10:00:08,000 --> 10:00:10,000",
            "Last one",
        ])
        .unwrap();
        assert_eq!(captions.len(), 3);
        assert_eq!(
            captions[1].lines,
            vec!["Third subtitle line 1.", "Third subtitle line 2."]
        );
        assert_eq!(captions[2].start, "10:00:08,000");
        assert_eq!(captions[2].text(), "Last one");
    }

    #[test]
    fn numeric_text_inside_a_caption_is_kept() {
        let captions = srt(&["1", "00:00:01,000 --> 00:00:02,000", "42", ""]).unwrap();
        assert_eq!(captions[0].lines, vec!["42"]);
    }

    #[test]
    fn text_before_any_timing_line() {
        let err = srt(&[
            "1",
            "00:00:01,000 --> 00:00:02,000",
            "Hello",
            "",
            "stray text",
            "",
        ])
        .unwrap_err();
        assert_eq!(err, Error::caption("caption missing timeframe", 5));
        assert_eq!(err.to_string(), "caption missing timeframe in line 5");
    }

    #[test]
    fn invalid_time_format() {
        let err = srt(&[
            "1",
            "00:00:01,000 --> 00:00:02,000",
            "Hello",
            "",
            "2",
            "00:00:03.000 --> 00:00:04.000",
            "World",
        ])
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid time format in line 6");
        assert_eq!(err.line(), Some(6));
    }

    #[test]
    fn caption_without_text() {
        let err = srt(&["1", "00:00:01,000 --> 00:00:02,000", "", "Hello"]).unwrap_err();
        assert_eq!(err, Error::caption("caption missing text", 3));
    }

    #[test]
    fn consecutive_timing_lines_drop_the_first_caption() {
        let captions = srt(&[
            "1",
            "00:00:01,000 --> 00:00:02,000",
            "00:00:03,000 --> 00:00:04,000",
            "Hello",
            "",
        ])
        .unwrap();
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].start, "00:00:03,000");
        assert!(captions.iter().all(|c| !c.lines.is_empty()));
    }

    #[test]
    fn trailing_caption_without_text_is_dropped() {
        let captions = srt(&[
            "1",
            "00:00:01,000 --> 00:00:02,000",
            "Hello",
            "",
            "2",
            "00:00:03,000 --> 00:00:04,000",
        ])
        .unwrap();
        assert_eq!(captions.len(), 1);
    }

    #[test]
    fn missing_index_is_a_file_error() {
        let err = srt(&["00:00:01,000 --> 00:00:02,000", "Hi"]).unwrap_err();
        assert_eq!(
            err,
            Error::MalformedFile("the file does not have a valid format".into())
        );
    }

    #[test]
    fn sbv_captions() {
        let captions = Format::Sbv
            .parse(&[
                "0:00:01.000,0:00:02.000",
                "Hi",
                "",
                "0:00:03.000,0:00:05.500",
                "Two",
                "lines",
            ])
            .unwrap();
        assert_eq!(captions.len(), 2);
        assert_eq!(captions[0].start, "0:00:01.000");
        assert_eq!(captions[0].end, "0:00:02.000");
        assert_eq!(captions[1].lines, vec!["Two", "lines"]);
    }

    #[test]
    fn sbv_does_not_skip_numeric_lines() {
        let err = Format::Sbv
            .parse(&["0:00:01.000,0:00:02.000", "Hi", "", "2", ""])
            .unwrap_err();
        assert_eq!(err, Error::caption("caption missing timeframe", 4));
    }

    #[test]
    fn parsing_is_repeatable() {
        let lines = ["1", "00:00:01,000 --> 00:00:02,000", "Hello", "", "2"];
        assert_eq!(srt(&lines), srt(&lines));
    }

    #[test]
    fn whitespace_only_lines_are_caption_text() {
        let captions = srt(&[
            "1",
            "00:00:01,000 --> 00:00:02,000",
            "Hello",
            "  ",
            "World",
            "",
        ])
        .unwrap();
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].lines, vec!["Hello", "  ", "World"]);
    }

    #[test]
    fn non_ascii_index_lines_are_skipped() {
        let captions = srt(&[
            "1",
            "00:00:01,000 --> 00:00:02,000",
            "Hello",
            "",
            "\u{661}\u{662}",
            "00:00:03,000 --> 00:00:04,000",
            "World",
        ])
        .unwrap();
        assert_eq!(captions.len(), 2);
        assert_eq!(captions[1].lines, vec!["World"]);
    }
}

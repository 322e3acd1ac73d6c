/// A single caption: the span it is shown for and the text shown on screen.
///
/// Timestamps are kept verbatim in the syntax of the source format.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Caption {
    /// Cue identifier, only ever present for WebVTT.
    pub identifier: Option<String>,
    pub start: String,
    pub end: String,
    pub lines: Vec<String>,
}

impl Caption {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            identifier: None,
            start: start.into(),
            end: end.into(),
            lines: vec![],
        }
    }

    pub fn add_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

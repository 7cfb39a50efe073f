//! In-memory line buffer implementing [`Host`].

use std::ops::Range;

use crate::error::{Error, Result};
use crate::host::{Document, Host, Selection};
use crate::indent::IndentConfig;

/// Line terminator style of a buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Detect the style from the first line break in `text`.
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(pos) if text[..pos].ends_with('\r') => Self::CrLf,
            _ => Self::Lf,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// A document held as a vector of lines, with a selection and settings.
///
/// Each line keeps its own terminator, so `from_text` followed by `to_text`
/// is lossless even for mixed line endings. Lines inserted by an edit take
/// the style of the first line break in the original text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
    endings: Vec<LineEnding>,
    selection: Selection,
    indent: IndentConfig,
    line_ending: LineEnding,
    trailing_newline: bool,
}

impl LineBuffer {
    pub fn from_text(text: &str) -> Self {
        let line_ending = LineEnding::detect(text);
        let mut lines = Vec::new();
        let mut endings = Vec::new();
        for chunk in text.split_inclusive('\n') {
            let (line, ending) = if let Some(line) = chunk.strip_suffix("\r\n") {
                (line, LineEnding::CrLf)
            } else if let Some(line) = chunk.strip_suffix('\n') {
                (line, LineEnding::Lf)
            } else {
                (chunk, line_ending)
            };
            lines.push(line.to_string());
            endings.push(ending);
        }

        Self {
            lines,
            endings,
            line_ending,
            trailing_newline: text.ends_with('\n'),
            ..Self::default()
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        Self {
            endings: vec![LineEnding::Lf; lines.len()],
            lines,
            trailing_newline: true,
            ..Self::default()
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_indent_config(mut self, indent: IndentConfig) -> Self {
        self.indent = indent;
        self
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Terminator used for lines an edit inserts.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Join the lines back into text, each with its own terminator.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        let last = self.lines.len().saturating_sub(1);
        for (i, (line, ending)) in self.lines.iter().zip(&self.endings).enumerate() {
            text.push_str(line);
            if i < last || self.trailing_newline {
                text.push_str(ending.as_str());
            }
        }
        text
    }
}

impl Document for LineBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }
}

impl Host for LineBuffer {
    fn selection(&self) -> Selection {
        self.selection
    }

    fn indent_config(&self) -> IndentConfig {
        self.indent
    }

    fn replace_lines(&mut self, span: Range<usize>, new_text: &str) -> Result<()> {
        if span.start > span.end || span.end > self.lines.len() {
            return Err(Error::RangeOutOfBounds {
                span,
                line_count: self.lines.len(),
            });
        }
        let inserted: Vec<String> = new_text.lines().map(str::to_string).collect();
        self.endings
            .splice(span.clone(), vec![self.line_ending; inserted.len()]);
        self.lines.splice(span, inserted);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trip_lf() {
        let text = "a\n\nb\n";
        assert_eq!(LineBuffer::from_text(text).to_text(), text);
    }

    #[test]
    fn test_text_round_trip_crlf_without_final_newline() {
        let text = "a\r\nb";
        let buffer = LineBuffer::from_text(text);
        assert_eq!(buffer.line_ending(), LineEnding::CrLf);
        assert_eq!(buffer.lines(), ["a", "b"]);
        assert_eq!(buffer.to_text(), text);
    }

    #[test]
    fn test_text_round_trip_mixed_endings() {
        let text = "a();\nb();\r\nc();\n";
        let buffer = LineBuffer::from_text(text);
        assert_eq!(buffer.lines(), ["a();", "b();", "c();"]);
        assert_eq!(buffer.line_ending(), LineEnding::Lf);
        assert_eq!(buffer.to_text(), text);
    }

    #[test]
    fn test_replace_keeps_endings_outside_span() {
        let mut buffer = LineBuffer::from_text("a\r\nb\nc\r\n");
        buffer.replace_lines(1..2, "x\ny\n").unwrap();
        assert_eq!(buffer.to_text(), "a\r\nx\r\ny\r\nc\r\n");
    }

    #[test]
    fn test_replace_lines_splices() {
        let mut buffer = LineBuffer::from_lines(["a", "b", "c"]);
        buffer.replace_lines(1..2, "x\ny\n").unwrap();
        assert_eq!(buffer.lines(), ["a", "x", "y", "c"]);
    }

    #[test]
    fn test_replace_lines_rejects_out_of_range() {
        let mut buffer = LineBuffer::from_lines(["a"]);
        let err = buffer.replace_lines(0..2, "x\n").unwrap_err();
        assert!(matches!(err, Error::RangeOutOfBounds { line_count: 1, .. }));
        assert_eq!(buffer.lines(), ["a"]);
    }
}

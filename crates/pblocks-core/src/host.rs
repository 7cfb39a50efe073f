//! The narrow interface between the region model and a host editor.
//!
//! The core never reaches into ambient editor state. Everything it reads or
//! writes goes through these traits, so the model runs the same against a
//! real editor, a file on disk, or a `Vec<String>` in a test.

use std::ops::{Range, RangeInclusive};

use crate::error::Result;
use crate::indent::IndentConfig;

/// Read access to a document's lines.
pub trait Document {
    /// Number of lines in the document.
    fn line_count(&self) -> usize;

    /// Text of line `index` without its line terminator.
    fn line(&self, index: usize) -> Option<&str>;

    /// Owned copies of the lines in `range`, or `None` if any is missing.
    fn lines_in(&self, range: RangeInclusive<usize>) -> Option<Vec<String>> {
        range
            .map(|i| self.line(i).map(str::to_string))
            .collect()
    }
}

/// A host editor: a document plus selection, settings, and edit application.
pub trait Host: Document {
    /// The current selection, by line.
    fn selection(&self) -> Selection;

    /// The editor's indentation settings for this document.
    fn indent_config(&self) -> IndentConfig;

    /// Replace lines `span.start..span.end` with `new_text`.
    ///
    /// `new_text` holds whole lines, each terminated by `\n`. The replacement
    /// must be applied all or nothing.
    fn replace_lines(&mut self, span: Range<usize>, new_text: &str) -> Result<()>;
}

impl<S: AsRef<str>> Document for [S] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

impl<S: AsRef<str>> Document for Vec<S> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

/// An inclusive, zero-based range of selected lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub start_line: usize,
    pub end_line: usize,
}

impl Selection {
    /// Selection between two lines, in either order.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start_line: a.min(b),
            end_line: a.max(b),
        }
    }

    /// A cursor on a single line.
    pub fn line(line: usize) -> Self {
        Self::new(line, line)
    }

    /// The same selection with `start_line <= end_line`.
    pub fn normalized(self) -> Self {
        Self::new(self.start_line, self.end_line)
    }

    /// Whether every selected line exists in a document of `line_count` lines.
    pub fn is_within(&self, line_count: usize) -> bool {
        self.start_line.max(self.end_line) < line_count
    }

    pub fn lines(&self) -> RangeInclusive<usize> {
        let s = self.normalized();
        s.start_line..=s.end_line
    }
}

//! Leading-whitespace measurement and regeneration.
//!
//! Indentation is decomposed into a run of tabs and a run of spaces. When it
//! is rendered back, spaces always come first and only the tab portion depends
//! on the editor's insert-spaces setting. Generated marker lines depend on this
//! exact layout, so keep it as is.

use serde::{Deserialize, Serialize};

/// Leading whitespace of a line, as a count of tabs and spaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IndentationSpec {
    pub tabs: usize,
    pub spaces: usize,
}

impl IndentationSpec {
    /// Measure the leading whitespace of `line`.
    ///
    /// Scanning stops at the first character that is neither a tab nor a
    /// space. Blank lines are measured in full.
    pub fn measure(line: &str) -> Self {
        let mut spec = Self::default();
        for c in line.chars() {
            match c {
                '\t' => spec.tabs += 1,
                ' ' => spec.spaces += 1,
                _ => break,
            }
        }
        spec
    }

    /// Column width with every tab counted as `tab_size` columns.
    pub fn width(&self, tab_size: usize) -> usize {
        self.tabs * tab_size + self.spaces
    }

    /// Render this indentation for the given editor settings.
    pub fn render(&self, insert_spaces: bool, tab_size: usize) -> String {
        let mut out = " ".repeat(self.spaces);
        if insert_spaces {
            out.push_str(&" ".repeat(self.tabs * tab_size));
        } else {
            out.push_str(&"\t".repeat(self.tabs));
        }
        out
    }
}

/// Measure the leading whitespace of `line`.
pub fn measure(line: &str) -> IndentationSpec {
    IndentationSpec::measure(line)
}

/// Render `spec` as whitespace for the given editor settings.
pub fn render(spec: IndentationSpec, insert_spaces: bool, tab_size: usize) -> String {
    spec.render(insert_spaces, tab_size)
}

/// The verbatim leading whitespace (tabs and spaces) of `line`.
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// Editor indentation settings supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndentConfig {
    /// Expand tabs into `tab_size` spaces when generating indentation.
    pub insert_spaces: bool,
    /// Width of a tab, in columns.
    pub tab_size: usize,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            insert_spaces: true,
            tab_size: 4,
        }
    }
}

impl IndentConfig {
    pub fn new(insert_spaces: bool, tab_size: usize) -> Self {
        Self {
            insert_spaces,
            tab_size,
        }
    }

    /// Render `spec` with these settings.
    pub fn render(&self, spec: IndentationSpec) -> String {
        spec.render(self.insert_spaces, self.tab_size)
    }

    /// Regenerate the indentation of `line` with these settings.
    pub fn reindent(&self, line: &str) -> String {
        self.render(IndentationSpec::measure(line))
    }
}

//! Line-level marker grammar.
//!
//! Markers are recognized by pattern anywhere in a line, never by position:
//!
//! ```text
//! //#region          region start
//! // __1__           declaration block header
//! // __2__active     active declaration block header
//! //#endregion       region end, live code follows
//! //#endblock        block end, closes the live code
//! ```
//!
//! Every predicate accepts `&str` or `Option<&str>`; an absent line never
//! matches. An active header also satisfies [`is_block_start`], so callers
//! that care about the difference check [`is_active_block`] first.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::indent::{IndentConfig, leading_whitespace};

/// The line-comment token every marker is embedded in.
pub const COMMENT: &str = "//";

static REGION_START_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//#region").expect("Invalid region start regex"));

static REGION_END_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//#endregion").expect("Invalid region end regex"));

static ACTIVE_BLOCK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//\s*__\d+__active").expect("Invalid active block regex"));

/// Captures the block id and the optional `active` suffix.
static BLOCK_START_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"//\s*__(\d+)__(active)?").expect("Invalid block start regex")
});

static BLOCK_END_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//#endblock").expect("Invalid block end regex"));

fn line_matches<'a>(pattern: &Regex, line: impl Into<Option<&'a str>>) -> bool {
    line.into().is_some_and(|l| pattern.is_match(l))
}

/// Line opens a region.
pub fn is_region_start<'a>(line: impl Into<Option<&'a str>>) -> bool {
    line_matches(&REGION_START_PATTERN, line)
}

/// Line closes the declaration area; live code follows.
pub fn is_region_end<'a>(line: impl Into<Option<&'a str>>) -> bool {
    line_matches(&REGION_END_PATTERN, line)
}

/// Line is a declaration block header, active or not.
pub fn is_block_start<'a>(line: impl Into<Option<&'a str>>) -> bool {
    line_matches(&BLOCK_START_PATTERN, line)
}

/// Line is the header of the active declaration block.
pub fn is_active_block<'a>(line: impl Into<Option<&'a str>>) -> bool {
    line_matches(&ACTIVE_BLOCK_PATTERN, line)
}

/// Line closes the region's live code.
pub fn is_block_end<'a>(line: impl Into<Option<&'a str>>) -> bool {
    line_matches(&BLOCK_END_PATTERN, line)
}

/// A recognized marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "kebab-case")]
pub enum Marker {
    RegionStart,
    RegionEnd,
    BlockStart(u32),
    BlockActive(u32),
    BlockEnd,
}

impl Marker {
    /// Classify a line, checking the active header before the plain one.
    ///
    /// A header whose id does not fit in a `u32` is not classified.
    pub fn classify<'a>(line: impl Into<Option<&'a str>>) -> Option<Self> {
        let line = line.into()?;
        if is_region_start(line) {
            Some(Self::RegionStart)
        } else if is_region_end(line) {
            Some(Self::RegionEnd)
        } else if is_block_end(line) {
            Some(Self::BlockEnd)
        } else {
            BlockHeader::parse(line).map(|header| {
                if header.active {
                    Self::BlockActive(header.id)
                } else {
                    Self::BlockStart(header.id)
                }
            })
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegionStart => write!(f, "region start"),
            Self::RegionEnd => write!(f, "region end"),
            Self::BlockStart(id) => write!(f, "block {id}"),
            Self::BlockActive(id) => write!(f, "block {id} (active)"),
            Self::BlockEnd => write!(f, "block end"),
        }
    }
}

/// Structured form of a declaration block header line.
///
/// Headers are edited through this type and rendered fresh, so toggling the
/// active flag never touches the text of user code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    /// Leading whitespace of the header line.
    pub indent: String,
    pub id: u32,
    pub active: bool,
}

impl BlockHeader {
    pub fn new(indent: impl Into<String>, id: u32, active: bool) -> Self {
        Self {
            indent: indent.into(),
            id,
            active,
        }
    }

    /// Parse a header line. Returns `None` if the line is not a header or
    /// its id does not fit in a `u32`.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = BLOCK_START_PATTERN.captures(line)?;
        let id = caps.get(1)?.as_str().parse().ok()?;
        Some(Self {
            indent: leading_whitespace(line).to_string(),
            id,
            active: caps.get(2).is_some(),
        })
    }

    /// Render the header as a line.
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BlockHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.active { "active" } else { "" };
        write!(f, "{}{COMMENT} __{}__{suffix}", self.indent, self.id)
    }
}

pub fn region_start_line(indent: &str) -> String {
    format!("{indent}{COMMENT}#region")
}

pub fn region_end_line(indent: &str) -> String {
    format!("{indent}{COMMENT}#endregion")
}

pub fn block_end_line(indent: &str) -> String {
    format!("{indent}{COMMENT}#endblock")
}

/// Demote a line of live code to a commented declaration line.
///
/// The indentation is regenerated from the line with `config`, and the
/// trimmed content follows the comment token and one space.
pub fn comment_line(line: &str, config: &IndentConfig) -> String {
    format!("{}{COMMENT} {}", config.reindent(line), line.trim())
}

/// Store a live line in a declaration block.
///
/// The comment token goes after the leading whitespace, which is kept as is,
/// so [`uncomment_line`] gives back the exact line.
pub fn demote_line(line: &str) -> String {
    let indent = leading_whitespace(line);
    format!("{indent}{COMMENT} {}", &line[indent.len()..])
}

/// Promote a commented declaration line back to live code.
///
/// Removes the comment token and one following space, keeping the leading
/// whitespace. Lines that are not commented are returned unchanged.
pub fn uncomment_line(line: &str) -> String {
    let indent = leading_whitespace(line);
    match line[indent.len()..].strip_prefix(COMMENT) {
        Some(rest) => {
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            format!("{indent}{rest}")
        }
        None => line.to_string(),
    }
}

//! Edit types for region modification.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

use crate::error::Result;
use crate::host::Host;

/// The kind of edit a command produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EditKind {
    /// Wrapped the selection in a new two-block region.
    CreateRegion,
    /// Added a new active block to an existing region.
    AddBlock { id: u32 },
    /// Switched which declaration block is active.
    ActivateBlock { id: u32 },
}

/// A single line-range replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edit {
    /// The kind of edit.
    pub kind: EditKind,
    /// Zero-based line range being replaced (end exclusive).
    pub span: Range<usize>,
    /// The replaced lines, each terminated by `\n`.
    pub old_content: String,
    /// The replacement lines, each terminated by `\n`.
    pub new_content: String,
}

impl Edit {
    /// Apply this edit to a host buffer.
    pub fn apply<H: Host + ?Sized>(&self, host: &mut H) -> Result<()> {
        host.replace_lines(self.span.clone(), &self.new_content)
    }

    /// Number of lines the replacement inserts.
    pub fn new_line_count(&self) -> usize {
        self.new_content.lines().count()
    }

    /// The edit that undoes this one once it has been applied.
    pub fn inverse(&self) -> Edit {
        Edit {
            kind: self.kind,
            span: self.span.start..self.span.start + self.new_line_count(),
            old_content: self.new_content.clone(),
            new_content: self.old_content.clone(),
        }
    }
}

/// Why a command left the buffer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// The document has no lines.
    EmptyDocument,
    /// The selection lies outside the document.
    InvalidSelection,
    /// The cursor is not inside a region.
    NotInRegion,
    /// The region has no single active block, or its markers are out of order.
    NoActiveBlock,
    /// There is only one declaration block to switch to.
    SingleDeclaration,
    /// The active block carries commented lines that switching would lose.
    ActiveBlockNotEmpty,
    /// No unused id is left above the largest block id.
    IdsExhausted,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::EmptyDocument => "document is empty",
            Self::InvalidSelection => "selection is outside the document",
            Self::NotInRegion => "cursor is not inside a parallel region",
            Self::NoActiveBlock => "region has no single active block",
            Self::SingleDeclaration => "region has only one declaration block",
            Self::ActiveBlockNotEmpty => "active block header has lines under it",
            Self::IdsExhausted => "no block id is left above the largest one",
        };
        f.write_str(message)
    }
}

/// Result of planning or executing a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum Outcome {
    Applied(Edit),
    Skipped { reason: SkipReason },
}

impl Outcome {
    pub fn skipped(reason: SkipReason) -> Self {
        Self::Skipped { reason }
    }

    pub fn edit(&self) -> Option<&Edit> {
        match self {
            Self::Applied(edit) => Some(edit),
            Self::Skipped { .. } => None,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

//! Region parsing, editing, and rendering for parallel code blocks.
//!
//! A parallel region keeps several alternative versions of a code block
//! inline. One version is live; the others are stored as commented-out
//! declaration blocks. The markers live in `//` line comments:
//!
//! ```text
//! //#region
//! // __1__
//! // old_version();
//! // __2__active
//! //#endregion
//! new_version();
//! //#endblock
//! ```
//!
//! The text is the only state store. Every command re-locates and re-parses
//! the region from the current buffer, mutates the parsed [`Region`], and
//! hands the host a single line-range [`Edit`] to apply.
//!
//! Host editors plug in through the [`Host`] trait; [`LineBuffer`] is an
//! in-memory implementation used by the CLI and tests.

pub mod buffer;
pub mod command;
pub mod config;
pub mod edit;
pub mod error;
pub mod host;
pub mod indent;
pub mod marker;
pub mod region;
pub mod scan;

pub use buffer::{LineBuffer, LineEnding};
pub use command::{
    Command, create_or_extend_region, execute, next_block, plan, previous_block,
};
pub use config::Config;
pub use edit::{Edit, EditKind, Outcome, SkipReason};
pub use error::{Error, Result};
pub use host::{Document, Host, Selection};
pub use indent::{IndentConfig, IndentationSpec};
pub use marker::{
    BlockHeader, COMMENT, Marker, is_active_block, is_block_end, is_block_start, is_region_end,
    is_region_start,
};
pub use region::{Block, BlockKind, Direction, Region, RegionSpan, create_region, locate};
pub use scan::{Diagnostic, MarkerLine, RegionSummary, diagnostics, find_regions, scan_markers};

//! Region model: locate, parse, mutate, and render parallel regions.
//!
//! A region spans from its `//#region` line to its `//#endblock` line:
//!
//! ```text
//! //#region            opening
//! // __1__             declaration block 1
//! // first();
//! // __2__active       declaration block 2 (active, header only)
//! //#endregion         live block
//! second();
//! //#endblock
//! ```
//!
//! Blocks are contiguous and their lines concatenate back to the source span,
//! so parsing and rendering an untouched region reproduces it byte for byte.

use std::ops::RangeInclusive;

use tracing::debug;

use crate::edit::SkipReason;
use crate::host::{Document, Selection};
use crate::indent::IndentConfig;
use crate::marker::{self, BlockHeader};

/// The line span of a region, from its start marker to its block end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionSpan {
    /// Line of the `//#region` marker.
    pub start: usize,
    /// Line of the `//#endblock` marker.
    pub end: usize,
}

impl RegionSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn lines(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Find the region enclosing `selection`.
///
/// Scans up from the first selected line for a region start, giving up on a
/// block end strictly above it (that one closes an earlier region). Scans down
/// from the last selected line for a block end, giving up on a second region
/// start. Returns `None` when either boundary is missing.
pub fn locate<D: Document + ?Sized>(doc: &D, selection: Selection) -> Option<RegionSpan> {
    let selection = selection.normalized();
    if !selection.is_within(doc.line_count()) {
        return None;
    }

    let mut region_start = None;
    for i in (0..=selection.start_line).rev() {
        let text = doc.line(i);
        if marker::is_region_start(text) {
            region_start = Some(i);
            break;
        } else if i != selection.start_line && marker::is_block_end(text) {
            debug!(line = i, "block end above selection, not in a region");
            return None;
        }
    }
    let start = region_start?;

    for i in selection.end_line..doc.line_count() {
        let text = doc.line(i);
        if marker::is_block_end(text) {
            return Some(RegionSpan::new(start, i));
        } else if i != start && marker::is_region_start(text) {
            debug!(line = i, "second region start below selection, not in a region");
            return None;
        }
    }

    debug!(start, "region start has no block end");
    None
}

/// What a block holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// A declaration block: a header line followed by commented code.
    Declaration(BlockHeader),
    /// The live block: `//#endregion`, raw code, `//#endblock`.
    Live,
}

/// A run of region lines, starting with its own marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    kind: BlockKind,
    lines: Vec<String>,
}

impl Block {
    fn declaration(header: BlockHeader, line: String) -> Self {
        Self {
            kind: BlockKind::Declaration(header),
            lines: vec![line],
        }
    }

    fn header_only(header: BlockHeader) -> Self {
        let line = header.to_line();
        Self::declaration(header, line)
    }

    fn live(line: String) -> Self {
        Self {
            kind: BlockKind::Live,
            lines: vec![line],
        }
    }

    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    /// All lines, marker line included.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn header(&self) -> Option<&BlockHeader> {
        match &self.kind {
            BlockKind::Declaration(header) => Some(header),
            BlockKind::Live => None,
        }
    }

    pub fn id(&self) -> Option<u32> {
        self.header().map(|h| h.id)
    }

    pub fn is_active(&self) -> bool {
        self.header().is_some_and(|h| h.active)
    }

    pub fn is_live(&self) -> bool {
        matches!(self.kind, BlockKind::Live)
    }

    /// Code lines without the block's marker lines.
    ///
    /// For a declaration this drops the header. For the live block it drops
    /// the `//#endregion` line and, when present, the `//#endblock` line.
    pub fn body(&self) -> &[String] {
        let rest = &self.lines[1..];
        match self.kind {
            BlockKind::Declaration(_) => rest,
            BlockKind::Live => match rest.split_last() {
                Some((last, body)) if marker::is_block_end(last.as_str()) => body,
                _ => rest,
            },
        }
    }

    fn is_closed(&self) -> bool {
        self.lines.len() >= 2 && self.lines.last().is_some_and(|l| marker::is_block_end(l.as_str()))
    }

    /// Flip the active flag and re-render the header line.
    fn set_active(&mut self, active: bool) {
        if let BlockKind::Declaration(header) = &mut self.kind {
            header.active = active;
            self.lines[0] = header.to_line();
        }
    }

    /// Swap the live block's code for `code`, keeping both marker lines.
    fn replace_live_body(&mut self, code: Vec<String>) {
        let close = self.lines.pop();
        self.lines.truncate(1);
        self.lines.extend(code);
        self.lines.extend(close);
    }
}

/// Which neighbour to activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Previous,
}

/// A parsed region.
///
/// Constructed on demand from the current text and discarded once rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    span: RegionSpan,
    /// The `//#region` line plus any lines before the first block header.
    opening: Vec<String>,
    blocks: Vec<Block>,
    /// Lines after the final block end. Only reachable through [`Region::parse`]
    /// on hand-built input; [`locate`] never produces them.
    trailing: Vec<String>,
    /// Index of the active declaration block, when the region is well formed.
    active: Option<usize>,
}

impl Region {
    /// Parse the lines of `span`.
    ///
    /// A block header line opens a declaration block; `//#endregion` opens the
    /// live block; `//#endblock` is appended to the open block and closes it.
    /// Every other line is appended to whichever block is open.
    ///
    /// The active index is only set when the structure is exactly what this
    /// crate produces: declaration blocks, then one closed live block, with a
    /// single active header. Anything else leaves it `None`, which makes every
    /// mutation a no-op.
    pub fn parse(span: RegionSpan, lines: Vec<String>) -> Self {
        let mut opening = Vec::new();
        let mut blocks = Vec::new();
        let mut trailing = Vec::new();
        let mut current: Option<Block> = None;
        let mut active_headers = Vec::new();
        let mut well_formed = true;

        for line in lines {
            if let Some(header) = BlockHeader::parse(&line) {
                blocks.extend(current.take());
                if header.active {
                    active_headers.push(blocks.len());
                }
                current = Some(Block::declaration(header, line));
                continue;
            }

            if marker::is_region_end(line.as_str()) {
                blocks.extend(current.take());
                current = Some(Block::live(line));
                continue;
            }

            if marker::is_block_start(line.as_str()) {
                // Header with an id too large to parse.
                well_formed = false;
            }

            let closes = marker::is_block_end(line.as_str());
            match current.as_mut() {
                Some(block) => block.lines.push(line),
                None if blocks.is_empty() => opening.push(line),
                None => {
                    well_formed = false;
                    trailing.push(line);
                }
            }
            if closes {
                blocks.extend(current.take());
            }
        }

        if let Some(block) = current.take() {
            well_formed = false;
            blocks.push(block);
        }

        let structure_ok = well_formed
            && opening
                .first()
                .is_some_and(|l| marker::is_region_start(l.as_str()))
            && blocks.len() >= 2
            && blocks
                .split_last()
                .is_some_and(|(live, decls)| {
                    live.is_live() && live.is_closed() && decls.iter().all(|b| !b.is_live())
                });

        let active = match active_headers.as_slice() {
            [index] if structure_ok => Some(*index),
            _ => None,
        };
        debug!(
            start = span.start,
            end = span.end,
            blocks = blocks.len(),
            ?active,
            "parsed region"
        );

        Self {
            span,
            opening,
            blocks,
            trailing,
            active,
        }
    }

    /// Read and parse the region at `span` from a document.
    pub fn read<D: Document + ?Sized>(doc: &D, span: RegionSpan) -> Option<Self> {
        doc.lines_in(span.lines())
            .map(|lines| Self::parse(span, lines))
    }

    /// Locate and parse the region enclosing `selection`.
    pub fn at<D: Document + ?Sized>(doc: &D, selection: Selection) -> Option<Self> {
        locate(doc, selection).and_then(|span| Self::read(doc, span))
    }

    pub fn span(&self) -> RegionSpan {
        self.span
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Index into [`Region::blocks`] of the active declaration block.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_block(&self) -> Option<&Block> {
        self.active.map(|i| &self.blocks[i])
    }

    /// Declaration blocks, in order.
    pub fn declarations(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| !b.is_live())
    }

    pub fn live_block(&self) -> Option<&Block> {
        self.blocks.last().filter(|b| b.is_live())
    }

    /// Whether every mutation precondition holds.
    pub fn is_well_formed(&self) -> bool {
        self.active.is_some()
    }

    /// The `//#region` line.
    pub fn opening_line(&self) -> &str {
        self.opening.first().map(String::as_str).unwrap_or_default()
    }

    /// Id for a new block: the block count, raised past every existing id.
    ///
    /// `None` when every id above the largest one is taken.
    pub fn next_id(&self) -> Option<u32> {
        let count = u32::try_from(self.blocks.len()).ok()?;
        let past_max = match self.declarations().filter_map(Block::id).max() {
            Some(id) => id.checked_add(1)?,
            None => 0,
        };
        Some(count.max(past_max))
    }

    /// Render the blocks: lines joined by `\n`, blocks joined by `\n`.
    ///
    /// No trailing newline; callers add one where they need it.
    pub fn render_blocks(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Every line after the `//#region` line, newline terminated.
    ///
    /// This is the replacement text for lines `span.start + 1 ..= span.end`.
    pub fn render_body(&self) -> String {
        let mut out = String::new();
        for line in self.lines().skip(1) {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// The whole region, without a trailing newline.
    pub fn render(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }

    fn lines(&self) -> impl Iterator<Item = &str> {
        self.opening
            .iter()
            .chain(self.blocks.iter().flat_map(|b| b.lines.iter()))
            .chain(self.trailing.iter())
            .map(String::as_str)
    }

    fn live_index(&self) -> usize {
        self.blocks.len() - 1
    }

    fn demoted_live_code(&self) -> Vec<String> {
        self.blocks[self.live_index()]
            .body()
            .iter()
            .map(|l| marker::demote_line(l))
            .collect()
    }

    /// Add a new, empty, active block.
    ///
    /// The active block is deactivated and receives the live code as commented
    /// lines, whitespace kept byte for byte. A header-only block with the next id is inserted before the live
    /// block and becomes active. The live code itself is untouched.
    ///
    /// Returns the new block's id.
    pub fn add_block(&mut self, config: &IndentConfig) -> Result<u32, SkipReason> {
        let active = self.active.ok_or(SkipReason::NoActiveBlock)?;
        let live = self.live_index();
        let id = self.next_id().ok_or(SkipReason::IdsExhausted)?;
        let demoted = self.demoted_live_code();

        let previous = &mut self.blocks[active];
        previous.set_active(false);
        previous.lines.extend(demoted);

        let header = BlockHeader::new(config.reindent(self.opening_line()), id, true);
        self.blocks.insert(live, Block::header_only(header));
        self.active = Some(live);

        debug!(id, "added block");
        Ok(id)
    }

    /// Make the next or previous declaration block active, wrapping around.
    ///
    /// The live code is stored under the old active header as commented lines,
    /// and the target block's commented lines become the live code. Both moves
    /// keep each line's leading whitespace, so switching back and forth
    /// restores the original text.
    ///
    /// Returns the id of the newly active block.
    pub fn activate(&mut self, direction: Direction) -> Result<u32, SkipReason> {
        let active = self.active.ok_or(SkipReason::NoActiveBlock)?;
        let live = self.live_index();
        if live < 2 {
            return Err(SkipReason::SingleDeclaration);
        }
        if !self.blocks[active].body().is_empty() {
            return Err(SkipReason::ActiveBlockNotEmpty);
        }

        let target = match direction {
            Direction::Next => (active + 1) % live,
            Direction::Previous => (active + live - 1) % live,
        };

        let demoted = self.demoted_live_code();
        let promoted: Vec<String> = self.blocks[target]
            .body()
            .iter()
            .map(|l| marker::uncomment_line(l))
            .collect();

        let previous = &mut self.blocks[active];
        previous.set_active(false);
        previous.lines.extend(demoted);

        let next = &mut self.blocks[target];
        next.set_active(true);
        next.lines.truncate(1);

        self.blocks[live].replace_live_body(promoted);
        self.active = Some(target);

        let id = self.blocks[target].id().unwrap_or_default();
        debug!(id, ?direction, "activated block");
        Ok(id)
    }
}

/// Wrap `lines` in a new region.
///
/// Block 1 holds a commented copy of the lines; block 2 is active and header
/// only, since the lines themselves stay live below `//#endregion`. Markers are
/// indented like the first line. Every emitted line ends with `\n`.
///
/// Returns `None` for an empty selection.
pub fn create_region<S: AsRef<str>>(lines: &[S], config: &IndentConfig) -> Option<String> {
    let first = lines.first()?.as_ref();
    let indent = config.reindent(first);

    let mut section = String::new();
    let mut push = |line: &str| {
        section.push_str(line);
        section.push('\n');
    };

    push(&marker::region_start_line(&indent));
    push(&BlockHeader::new(indent.as_str(), 1, false).to_line());
    for line in lines {
        push(&marker::comment_line(line.as_ref(), config));
    }
    push(&BlockHeader::new(indent.as_str(), 2, true).to_line());
    push(&marker::region_end_line(&indent));
    for line in lines {
        push(line.as_ref());
    }
    push(&marker::block_end_line(&indent));

    Some(section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    const REGION: &str = "\
//#region
// __1__
// first();
// __2__active
//#endregion
second();
//#endblock";

    #[test]
    fn test_parse_splits_blocks() {
        let doc = lines(REGION);
        let region = Region::parse(RegionSpan::new(0, 6), doc);

        assert_eq!(region.blocks().len(), 3);
        assert_eq!(region.active_index(), Some(1));
        assert_eq!(region.blocks()[0].body(), ["// first();"]);
        assert!(region.blocks()[1].body().is_empty());
        assert_eq!(region.live_block().unwrap().body(), ["second();"]);
    }

    #[test]
    fn test_render_round_trip() {
        let region = Region::parse(RegionSpan::new(0, 6), lines(REGION));
        assert_eq!(region.render(), REGION);
        assert_eq!(region.render_blocks(), REGION.split_once('\n').unwrap().1);
    }

    #[test]
    fn test_parse_without_active_header() {
        let text = REGION.replace("__2__active", "__2__");
        let region = Region::parse(RegionSpan::new(0, 6), lines(&text));
        assert_eq!(region.active_index(), None);
        assert_eq!(region.render(), text);
    }

    #[test]
    fn test_parse_with_two_active_headers() {
        let text = REGION.replace("// __1__", "// __1__active");
        let region = Region::parse(RegionSpan::new(0, 6), lines(&text));
        assert_eq!(region.active_index(), None);
    }

    #[test]
    fn test_parse_keeps_stray_lines_before_first_header() {
        let text = REGION.replace("//#region", "//#region\nstray");
        let region = Region::parse(RegionSpan::new(0, 7), lines(&text));
        assert_eq!(region.active_index(), Some(1));
        assert_eq!(region.render(), text);
    }

    #[test]
    fn test_next_id_skips_existing_ids() {
        let text = REGION.replace("__1__", "__7__");
        let region = Region::parse(RegionSpan::new(0, 6), lines(&text));
        assert_eq!(region.next_id(), Some(8));
    }

    #[test]
    fn test_add_block_without_active_is_noop() {
        let text = REGION.replace("__2__active", "__2__");
        let mut region = Region::parse(RegionSpan::new(0, 6), lines(&text));
        let before = region.clone();

        let result = region.add_block(&IndentConfig::default());
        assert_eq!(result, Err(SkipReason::NoActiveBlock));
        assert_eq!(region, before);
    }

    #[test]
    fn test_create_region_empty_selection() {
        let empty: [&str; 0] = [];
        assert_eq!(create_region(&empty, &IndentConfig::default()), None);
    }
}

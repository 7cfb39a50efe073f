//! Whole-document marker scanning and diagnostics.
//!
//! These helpers back host integrations such as syntax highlighting, an
//! outline of regions, or a lint pass. They never modify text.

use std::fmt;

use serde::Serialize;

use crate::host::{Document, Selection};
use crate::marker::Marker;
use crate::region::{Region, locate};

/// A marker and the zero-based line it sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerLine {
    pub line: usize,
    pub marker: Marker,
}

/// Every marker line in the document, in order.
pub fn scan_markers<D: Document + ?Sized>(doc: &D) -> Vec<MarkerLine> {
    (0..doc.line_count())
        .filter_map(|line| Marker::classify(doc.line(line)).map(|marker| MarkerLine { line, marker }))
        .collect()
}

/// Outline of one locatable region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionSummary {
    /// Line of the `//#region` marker.
    pub start: usize,
    /// Line of the `//#endblock` marker.
    pub end: usize,
    /// Declaration block ids, in order.
    pub block_ids: Vec<u32>,
    /// Ids of every declaration header flagged active.
    pub active_ids: Vec<u32>,
    /// Whether commands can mutate this region.
    pub well_formed: bool,
}

impl RegionSummary {
    fn from_region(region: &Region) -> Self {
        let span = region.span();
        Self {
            start: span.start,
            end: span.end,
            block_ids: region.declarations().filter_map(|b| b.id()).collect(),
            active_ids: region
                .declarations()
                .filter(|b| b.is_active())
                .filter_map(|b| b.id())
                .collect(),
            well_formed: region.is_well_formed(),
        }
    }

    /// The single active id, when there is exactly one.
    pub fn active_id(&self) -> Option<u32> {
        match self.active_ids.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }
}

/// Every region the locator can find, keyed by its `//#region` line.
pub fn find_regions<D: Document + ?Sized>(doc: &D) -> Vec<RegionSummary> {
    scan_markers(doc)
        .into_iter()
        .filter(|m| m.marker == Marker::RegionStart)
        .filter_map(|m| {
            let span = locate(doc, Selection::line(m.line))?;
            (span.start == m.line).then_some(span)
        })
        .filter_map(|span| Region::read(doc, span))
        .map(|region| RegionSummary::from_region(&region))
        .collect()
}

/// A marker problem that makes commands treat text as "no region" or skip it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    /// A region start with no block end after it.
    UnterminatedRegion { line: usize },
    /// A region start while another region is still open.
    NestedRegionStart { line: usize, outer: usize },
    /// A block end with no open region.
    StrayBlockEnd { line: usize },
    /// A region end or block header outside any region.
    StrayMarker { line: usize, marker: Marker },
    /// A region without an active block header.
    NoActiveBlock { start: usize },
    /// A region with more than one active block header.
    MultipleActiveBlocks { start: usize, ids: Vec<u32> },
    /// A region whose blocks are out of order.
    MalformedRegion { start: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedRegion { line } => {
                write!(f, "line {}: region is never closed with //#endblock", line + 1)
            }
            Self::NestedRegionStart { line, outer } => write!(
                f,
                "line {}: region starts inside the region opened on line {}",
                line + 1,
                outer + 1
            ),
            Self::StrayBlockEnd { line } => {
                write!(f, "line {}: //#endblock without a region", line + 1)
            }
            Self::StrayMarker { line, marker } => {
                write!(f, "line {}: {marker} marker outside a region", line + 1)
            }
            Self::NoActiveBlock { start } => {
                write!(f, "line {}: region has no active block", start + 1)
            }
            Self::MultipleActiveBlocks { start, ids } => write!(
                f,
                "line {}: region has several active blocks {ids:?}",
                start + 1
            ),
            Self::MalformedRegion { start } => {
                write!(f, "line {}: region blocks are out of order", start + 1)
            }
        }
    }
}

/// Report marker sequences the commands cannot work with.
pub fn diagnostics<D: Document + ?Sized>(doc: &D) -> Vec<Diagnostic> {
    let mut found = Vec::new();
    let mut open: Option<usize> = None;

    for MarkerLine { line, marker } in scan_markers(doc) {
        match marker {
            Marker::RegionStart => {
                if let Some(outer) = open {
                    found.push(Diagnostic::NestedRegionStart { line, outer });
                }
                open = Some(line);
            }
            Marker::BlockEnd => {
                if open.take().is_none() {
                    found.push(Diagnostic::StrayBlockEnd { line });
                }
            }
            Marker::RegionEnd | Marker::BlockStart(_) | Marker::BlockActive(_) => {
                if open.is_none() {
                    found.push(Diagnostic::StrayMarker { line, marker });
                }
            }
        }
    }
    if let Some(line) = open {
        found.push(Diagnostic::UnterminatedRegion { line });
    }

    for summary in find_regions(doc) {
        let start = summary.start;
        match summary.active_ids.len() {
            0 => found.push(Diagnostic::NoActiveBlock { start }),
            1 if !summary.well_formed => found.push(Diagnostic::MalformedRegion { start }),
            1 => {}
            _ => found.push(Diagnostic::MultipleActiveBlocks {
                start,
                ids: summary.active_ids,
            }),
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_markers_classifies_lines() {
        let doc = vec!["//#region", "// __1__", "code", "//#endblock"];
        let markers = scan_markers(&doc);
        assert_eq!(
            markers,
            vec![
                MarkerLine { line: 0, marker: Marker::RegionStart },
                MarkerLine { line: 1, marker: Marker::BlockStart(1) },
                MarkerLine { line: 3, marker: Marker::BlockEnd },
            ]
        );
    }

    #[test]
    fn test_stray_block_end() {
        let doc = vec!["code", "//#endblock"];
        assert_eq!(diagnostics(&doc), vec![Diagnostic::StrayBlockEnd { line: 1 }]);
    }
}

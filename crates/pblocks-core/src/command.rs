//! Editor commands over parallel regions.
//!
//! Each command re-reads the region from the current text, computes the whole
//! replacement, and issues a single [`Host::replace_lines`] call. When the
//! markers around the cursor are not in a state the command understands, the
//! outcome is [`Outcome::Skipped`] and the buffer is left as is.

use std::fmt;

use tracing::{debug, info};

use crate::edit::{Edit, EditKind, Outcome, SkipReason};
use crate::error::Result;
use crate::host::{Document, Host, Selection};
use crate::indent::IndentConfig;
use crate::region::{Direction, Region, RegionSpan, create_region, locate};

/// A command a host can bind to a key or menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Create a region around the selection, or add a block to the
    /// enclosing one.
    NewBlock,
    /// Activate the next declaration block.
    NextBlock,
    /// Activate the previous declaration block.
    PreviousBlock,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewBlock => write!(f, "new-block"),
            Self::NextBlock => write!(f, "next-block"),
            Self::PreviousBlock => write!(f, "prev-block"),
        }
    }
}

/// Compute what `command` would do, without touching the document.
pub fn plan<D: Document + ?Sized>(
    doc: &D,
    selection: Selection,
    config: &IndentConfig,
    command: Command,
) -> Outcome {
    let selection = selection.normalized();
    if doc.line_count() == 0 {
        return Outcome::skipped(SkipReason::EmptyDocument);
    }
    if !selection.is_within(doc.line_count()) {
        return Outcome::skipped(SkipReason::InvalidSelection);
    }

    let region = locate(doc, selection).and_then(|span| Region::read(doc, span));
    let outcome = match (command, region) {
        (Command::NewBlock, Some(region)) => extend(region, config),
        (Command::NewBlock, None) => wrap(doc, selection, config),
        (Command::NextBlock, Some(region)) => switch(region, Direction::Next),
        (Command::PreviousBlock, Some(region)) => switch(region, Direction::Previous),
        (Command::NextBlock | Command::PreviousBlock, None) => {
            Outcome::skipped(SkipReason::NotInRegion)
        }
    };

    if let Outcome::Skipped { reason } = &outcome {
        debug!(%command, %reason, "command skipped");
    }
    outcome
}

/// Run `command` against `host`, applying the edit if there is one.
pub fn execute<H: Host + ?Sized>(host: &mut H, command: Command) -> Result<Outcome> {
    let outcome = plan(&*host, host.selection(), &host.indent_config(), command);
    if let Outcome::Applied(edit) = &outcome {
        edit.apply(host)?;
        info!(
            %command,
            kind = ?edit.kind,
            start = edit.span.start,
            end = edit.span.end,
            "applied edit"
        );
    }
    Ok(outcome)
}

/// The "new block" command.
///
/// Outside a region, wraps the selected lines in a new two-block region.
/// Inside one, adds a new active block.
pub fn create_or_extend_region<H: Host + ?Sized>(host: &mut H) -> Result<Outcome> {
    execute(host, Command::NewBlock)
}

/// The "next block" command.
pub fn next_block<H: Host + ?Sized>(host: &mut H) -> Result<Outcome> {
    execute(host, Command::NextBlock)
}

/// The "previous block" command.
pub fn previous_block<H: Host + ?Sized>(host: &mut H) -> Result<Outcome> {
    execute(host, Command::PreviousBlock)
}

fn wrap<D: Document + ?Sized>(doc: &D, selection: Selection, config: &IndentConfig) -> Outcome {
    let Some(lines) = doc.lines_in(selection.lines()) else {
        return Outcome::skipped(SkipReason::InvalidSelection);
    };
    let Some(new_content) = create_region(&lines, config) else {
        return Outcome::skipped(SkipReason::InvalidSelection);
    };

    Outcome::Applied(Edit {
        kind: EditKind::CreateRegion,
        span: selection.start_line..selection.end_line + 1,
        old_content: terminated(&lines),
        new_content,
    })
}

fn extend(mut region: Region, config: &IndentConfig) -> Outcome {
    let old_content = region.render_body();
    match region.add_block(config) {
        Ok(id) => body_edit(&region, EditKind::AddBlock { id }, old_content),
        Err(reason) => Outcome::skipped(reason),
    }
}

fn switch(mut region: Region, direction: Direction) -> Outcome {
    let old_content = region.render_body();
    match region.activate(direction) {
        Ok(id) => body_edit(&region, EditKind::ActivateBlock { id }, old_content),
        Err(reason) => Outcome::skipped(reason),
    }
}

/// Replace everything after the region's `//#region` line.
fn body_edit(region: &Region, kind: EditKind, old_content: String) -> Outcome {
    let RegionSpan { start, end } = region.span();
    Outcome::Applied(Edit {
        kind,
        span: start + 1..end + 1,
        old_content,
        new_content: region.render_body(),
    })
}

fn terminated(lines: &[String]) -> String {
    lines.iter().map(|l| format!("{l}\n")).collect()
}

//! The mutating commands: new-block, next-block, prev-block.

use std::path::Path;

use colored::Colorize;
use similar::TextDiff;

use pblocks_core::{Command, EditKind, IndentConfig, LineBuffer, Outcome, Selection, execute};

use super::read_text;
use crate::cli::EditArgs;
use crate::error::{CliError, Result};

/// Run `command` against the file named in `args`.
///
/// `end` is the last selected line for multi-line selections. Skipped
/// commands leave the file alone and still succeed.
pub fn run_edit(
    command: Command,
    args: &EditArgs,
    end: Option<usize>,
    base: IndentConfig,
) -> Result<()> {
    let indent = indent_overrides(base, args);
    let start = args.line.get() - 1;
    let end = end.map_or(start, |line| line.saturating_sub(1));

    let original = read_text(&args.file)?;
    let mut buffer = LineBuffer::from_text(&original)
        .with_selection(Selection::new(start, end))
        .with_indent_config(indent);

    let edit = match execute(&mut buffer, command)? {
        Outcome::Applied(edit) => edit,
        Outcome::Skipped { reason } => {
            println!(
                "{} {}: {}",
                "Skipped".yellow().bold(),
                command.to_string().cyan(),
                reason
            );
            return Ok(());
        }
    };

    let updated = buffer.to_text();
    if args.dry_run {
        print_diff(&args.file, &original, &updated);
        return Ok(());
    }

    std::fs::write(&args.file, &updated).map_err(|e| CliError::file(&args.file, e))?;
    let first = edit.span.start + 1;
    let last = edit.span.start + edit.new_line_count();
    println!(
        "{} {} ({} lines {}-{})",
        "OK".green().bold(),
        describe(edit.kind),
        args.file.display().to_string().yellow(),
        first,
        last
    );
    Ok(())
}

fn indent_overrides(mut indent: IndentConfig, args: &EditArgs) -> IndentConfig {
    if let Some(tab_size) = args.tab_size {
        indent.tab_size = tab_size.get();
    }
    if args.tabs {
        indent.insert_spaces = false;
    }
    indent
}

fn describe(kind: EditKind) -> String {
    match kind {
        EditKind::CreateRegion => "Created region".to_string(),
        EditKind::AddBlock { id } => format!("Added block {id}"),
        EditKind::ActivateBlock { id } => format!("Activated block {id}"),
    }
}

/// Print a colored unified diff of the change.
fn print_diff(path: &Path, original: &str, updated: &str) {
    let name = path.display().to_string();
    let diff = TextDiff::from_lines(original, updated);
    let rendered = diff
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{name}"), &format!("b/{name}"))
        .to_string();

    for line in rendered.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
}

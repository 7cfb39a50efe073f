//! The check command.

use std::path::Path;

use colored::Colorize;

use pblocks_core::diagnostics;

use super::read_buffer;
use crate::error::Result;

/// Run the check command.
///
/// Returns `true` when the file is clean.
pub fn run_check(file: &Path) -> Result<bool> {
    let buffer = read_buffer(file)?;
    let found = diagnostics(&buffer);
    let name = file.display().to_string();

    if found.is_empty() {
        println!("{} {}", "OK".green().bold(), name);
        return Ok(true);
    }

    for diagnostic in &found {
        println!("{}: {}: {}", "warning".yellow().bold(), name, diagnostic);
    }
    println!();
    println!(
        "{} {} problem(s) in {}",
        "Found".red().bold(),
        found.len(),
        name
    );
    Ok(false)
}

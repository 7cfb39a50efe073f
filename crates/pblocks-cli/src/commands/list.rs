//! The list command.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use pblocks_core::find_regions;

use super::read_buffer;
use crate::error::Result;

/// One region as shown to users, with 1-based line numbers.
#[derive(Debug, Serialize)]
struct RegionEntry {
    start_line: usize,
    end_line: usize,
    block_ids: Vec<u32>,
    active_id: Option<u32>,
    well_formed: bool,
}

/// Run the list command
pub fn run_list(file: &Path, json: bool) -> Result<()> {
    let buffer = read_buffer(file)?;
    let entries: Vec<RegionEntry> = find_regions(&buffer)
        .into_iter()
        .map(|region| RegionEntry {
            start_line: region.start + 1,
            end_line: region.end + 1,
            active_id: region.active_id(),
            block_ids: region.block_ids,
            well_formed: region.well_formed,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No regions in {}", file.display().to_string().yellow());
        return Ok(());
    }

    println!(
        "{} {}",
        "Regions in".bold(),
        file.display().to_string().yellow()
    );
    for entry in &entries {
        let ids: Vec<String> = entry.block_ids.iter().map(u32::to_string).collect();
        let active = match entry.active_id {
            Some(id) => id.to_string().green(),
            None => "none".red(),
        };
        let status = if entry.well_formed {
            String::new()
        } else {
            format!(" {}", "(malformed)".red())
        };
        println!(
            "  lines {:>4}-{:<4}  blocks [{}]  active {}{}",
            entry.start_line,
            entry.end_line,
            ids.join(", "),
            active,
            status
        );
    }
    Ok(())
}

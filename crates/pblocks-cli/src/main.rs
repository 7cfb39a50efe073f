//! Parallel blocks CLI
//!
//! A file-backed host for the parallel-blocks commands: edits regions in a
//! file on disk, lists them, and reports marker problems.

mod cli;
mod commands;
mod error;
mod logging;

use std::num::NonZeroUsize;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};
use pblocks_core::Command;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("failed to set up logging: {e}")))?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::NewBlock { target, end } => {
            let config = commands::load_config(config_path)?;
            commands::run_edit(
                Command::NewBlock,
                &target,
                end.map(NonZeroUsize::get),
                config.indent,
            )?;
        }
        Commands::NextBlock { target } => {
            let config = commands::load_config(config_path)?;
            commands::run_edit(Command::NextBlock, &target, None, config.indent)?;
        }
        Commands::PrevBlock { target } => {
            let config = commands::load_config(config_path)?;
            commands::run_edit(Command::PreviousBlock, &target, None, config.indent)?;
        }
        Commands::List { file, json } => commands::run_list(&file, json)?,
        Commands::Check { file } => {
            if !commands::run_check(&file)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

//! CLI argument parsing using clap derive

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Parallel blocks - keep alternative versions of code side by side
#[derive(Parser, Debug)]
#[command(name = "pblocks")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to .pblocks.toml in the current directory)
    #[arg(long, global = true, value_name = "PATH", env = "PBLOCKS_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Where a mutating command acts, and how it writes.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EditArgs {
    /// File to edit
    pub file: PathBuf,

    /// Line the cursor is on (1-based)
    #[arg(short, long)]
    pub line: NonZeroUsize,

    /// Print a unified diff instead of writing the file
    #[arg(long)]
    pub dry_run: bool,

    /// Width of a tab stop, overriding the configuration file
    #[arg(long, value_name = "N")]
    pub tab_size: Option<NonZeroUsize>,

    /// Indent generated lines with tabs instead of spaces
    #[arg(long)]
    pub tabs: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Wrap the selected lines in a new region, or add a block to the enclosing one
    ///
    /// Examples:
    ///   pblocks new-block src/main.rs --line 12             # Wrap one line
    ///   pblocks new-block src/main.rs --line 12 --end 18    # Wrap a range
    ///   pblocks new-block src/main.rs --line 30 --dry-run   # Preview only
    NewBlock {
        #[command(flatten)]
        target: EditArgs,

        /// Last selected line (1-based), for multi-line selections
        #[arg(short, long)]
        end: Option<NonZeroUsize>,
    },

    /// Activate the next declaration block of the enclosing region
    NextBlock {
        #[command(flatten)]
        target: EditArgs,
    },

    /// Activate the previous declaration block of the enclosing region
    PrevBlock {
        #[command(flatten)]
        target: EditArgs,
    },

    /// List the regions in a file
    List {
        /// File to scan
        file: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Report marker problems in a file
    ///
    /// Exits with status 1 when any problem is found.
    Check {
        /// File to scan
        file: PathBuf,
    },
}

//! Subcommand implementations

mod check;
mod edit;
mod list;

pub use check::run_check;
pub use edit::run_edit;
pub use list::run_list;

use std::path::Path;

use pblocks_core::{Config, LineBuffer, config::CONFIG_FILE_NAME};

use crate::error::{CliError, Result};

/// Load the configuration from `explicit`, or from the default file in the
/// current directory when it exists.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match explicit {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new(CONFIG_FILE_NAME))?,
    };
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| CliError::file(path, e))
}

fn read_buffer(path: &Path) -> Result<LineBuffer> {
    read_text(path).map(|text| LineBuffer::from_text(&text))
}

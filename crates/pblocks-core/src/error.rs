//! Error types for pblocks-core
//!
//! Structural problems with markers are not errors: commands report them as
//! [`crate::Outcome::Skipped`] and leave the buffer alone. This enum covers
//! the failures a caller can actually act on.

use std::ops::Range;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Line range {span:?} is outside a document of {line_count} lines")]
    RangeOutOfBounds {
        span: Range<usize>,
        line_count: usize,
    },

    #[error("Invalid configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            path: path.into(),
            message: message.into(),
        }
    }
}

//! Configuration types and loading.
//!
//! Hosts that have their own editor settings pass an [`IndentConfig`]
//! straight through [`crate::Host::indent_config`]. Hosts without one, like
//! the CLI, read it from a TOML file:
//!
//! ```toml
//! [indent]
//! insert_spaces = false
//! tab_size = 8
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::indent::IndentConfig;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".pblocks.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Indentation used for generated marker and comment lines.
    #[serde(default)]
    pub indent: IndentConfig,
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, PathBuf::from("<content>"))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path.to_path_buf())
    }

    /// Load `path` if it exists, otherwise return the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn parse(content: &str, path: PathBuf) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::invalid_config(&path, e.to_string()))?;
        config.validate(path)
    }

    fn validate(self, path: PathBuf) -> Result<Self> {
        if self.indent.tab_size == 0 {
            return Err(Error::invalid_config(path, "indent.tab_size must be at least 1"));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.indent.insert_spaces);
        assert_eq!(config.indent.tab_size, 4);
    }

    #[test]
    fn test_partial_indent_table() {
        let config = Config::from_toml_str("[indent]\ninsert_spaces = false\n").unwrap();
        assert!(!config.indent.insert_spaces);
        assert_eq!(config.indent.tab_size, 4);
    }

    #[test]
    fn test_zero_tab_size_rejected() {
        let err = Config::from_toml_str("[indent]\ntab_size = 0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = Config::from_toml_str("[indent\n").unwrap_err();
        assert!(err.to_string().contains("<content>"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[indent]\ntab_size = 2\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.indent.tab_size, 2);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}

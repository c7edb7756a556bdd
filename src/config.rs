//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! We look for a vigil.toml in the working directory (or the path given with
//! `--config`), and if present load settings from there. This provides the
//! theme, how long a navigated-to section stays highlighted, and the file
//! extensions treated as articles.

use crate::error::{Error, Result};
use facet::Facet;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "vigil.toml";

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from vigil.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "dark".to_string())]
    /// Colour table name: "dark" or "light".
    pub theme: String,
    #[facet(default = 2000)]
    /// Milliseconds a navigated-to section stays emphasised.
    pub highlight_ms: u64,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
}

impl Config {
    /// Load configuration from `path`, or from vigil.toml if no path is given.
    ///
    /// A missing default file yields the defaults. An explicit path must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file cannot be read, if the default
    /// file exists but cannot be read, or if any file that was read does not
    /// parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::parse(&fs::read_to_string(path)?),
            None => Self::load_optional(Path::new(DEFAULT_CONFIG_FILE)),
        }
    }

    /// Load from `path` if it exists, otherwise use the defaults.
    fn load_optional(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                String::new()
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text; empty text gives the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration.
    pub fn parse(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config(e.to_string()))
    }

    #[must_use]
    /// Highlight lifetime as a duration.
    pub fn highlight_duration(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;

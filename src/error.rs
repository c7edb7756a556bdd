//! Error type shared by loading, configuration and the CLI.
//!
//! The search engine itself cannot fail; everything here comes from the edges
//! of the program where files are read and parsed.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while reading articles or configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a file or talking to the terminal failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// tree-sitter could not set up or run the markdown grammar.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Document being parsed.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// The configuration file exists but is not valid.
    #[error("Config error: {0}")]
    Config(String),

    /// None of the given paths produced an article with sections.
    #[error("No articles found")]
    NoArticles,

    /// Serialising search output failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

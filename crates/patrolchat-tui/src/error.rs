//! Frontend errors.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while starting or running the terminal client.
#[derive(Debug, Error)]
pub enum TuiError {
    /// I/O error from terminal or file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A file could not be opened, read or created.
    #[error("cannot access {}: {source}", path.display())]
    File {
        /// File that was accessed.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// An input file is not valid JSON for its purpose.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// A theme color is not a `#RRGGBB` value.
    #[error("invalid color for {key}: {value:?}")]
    InvalidColor {
        /// Palette key.
        key: &'static str,
        /// Rejected value.
        value: String,
    },
}

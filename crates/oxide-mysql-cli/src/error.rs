//! Error types for the command-line tool.

use std::path::PathBuf;

/// Errors reported by the `oxide-mysql` commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The input file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        /// Path of the input (`-` for stdin).
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// `--server-version` is not a version number.
    #[error("Invalid server version '{0}': expected e.g. 8.0.32 or 80032")]
    InvalidServerVersion(String),

    /// The script contains a syntax error.
    #[error("{rendered}")]
    Syntax {
        /// The diagnostic, rendered against the source.
        rendered: String,
    },

    /// `check` found invalid statements.
    #[error("{count} statement(s) failed to parse")]
    Invalid {
        /// Number of errors.
        count: usize,
    },

    /// JSON serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

//! Error types shared by the analyzer library

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading a vocabulary or writing results.
///
/// Undecodable token bytes are not errors: they are routed through the
/// partial UTF-8 predicates and classified like any other token.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Vocabulary or id-list input is missing, inconsistent or malformed
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalyzerError {
    /// Build an `InvalidInput` from anything printable
    pub fn invalid(msg: impl Into<String>) -> Self {
        AnalyzerError::InvalidInput(msg.into())
    }

    /// Attach a path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalyzerError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

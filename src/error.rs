use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Fatal run errors
// ---------------------------------------------------------------------------

/// Failures that abort a run. Per-record problems never show up here: a
/// malformed code is absorbed by the parser fallback and only logged.
#[derive(Debug, Error)]
pub enum CanonError {
    #[error("input file not found: {}", path.display())]
    MissingInputFile { path: PathBuf },

    #[error("I/O failure reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O failure writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid delimiter {delimiter:?}: must be a single ASCII character other than a line break")]
    InvalidDelimiter { delimiter: char },

    #[error("invalid settings ({}): {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CanonError {
    /// Process exit code for this failure class.
    pub fn exit_code(&self) -> u8 {
        match self {
            CanonError::MissingInputFile { .. } => 1,
            CanonError::Read { .. }
            | CanonError::Write { .. }
            | CanonError::InvalidDelimiter { .. }
            | CanonError::Settings { .. } => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, CanonError>;

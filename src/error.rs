//! Error types for the dsl2pdf conversion pipeline.
//!
//! Every stage returns [`ConvertError`]. Callers that only care about the broad
//! failure category can match on [`ConvertError::kind`] instead of the variants.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Broad failure categories reported by the conversion pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input file does not exist.
    NotFound,
    /// Reading the input, locating fonts or writing the output failed.
    Io,
    /// Tokenizing the text or laying out the document failed.
    Processing,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::Io => write!(f, "I/O error"),
            Self::Processing => write!(f, "processing error"),
        }
    }
}

/// All errors returned by the dsl2pdf library.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input file was not found at the given path.
    #[error("{} not found", path.display())]
    NotFound { path: PathBuf },

    /// The input file exists but could not be read as UTF-8 text.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The rendered document could not be written to disk.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The font files needed for layout could not be located or loaded.
    #[error("failed to load fonts: {message}")]
    Fonts { message: String },

    /// Tokenizing or rendering failed.
    #[error("{stage} failed: {message}")]
    Processing {
        stage: &'static str,
        message: String,
    },
}

impl ConvertError {
    /// Returns the broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Read { .. } | Self::Write { .. } | Self::Fonts { .. } => ErrorKind::Io,
            Self::Processing { .. } => ErrorKind::Processing,
        }
    }

    pub(crate) fn processing(stage: &'static str, message: impl fmt::Display) -> Self {
        Self::Processing {
            stage,
            message: message.to_string(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = ConvertError> = std::result::Result<T, E>;

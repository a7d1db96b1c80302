//! Error types for pleco-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Boxed error coming back from a record store implementation.
pub type StoreFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while placing tone marks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToneError {
    #[error("tone rendering fault: syllable '{syllable}' has no vowel to mark")]
    NoVowel { syllable: String },
}

/// Errors that can occur while reading an export.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("source unreadable: {reason}")]
    SourceUnreadable { reason: String },

    #[error("malformed card at index {index}: {reason}")]
    MalformedCard { index: usize, reason: String },

    #[error(transparent)]
    Tone(#[from] ToneError),

    #[error("unsupported line {line}: {reason}")]
    UnsupportedLine { line: usize, reason: String },
}

impl ParseError {
    pub(crate) fn unreadable(reason: impl Into<String>) -> Self {
        Self::SourceUnreadable {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedCard {
            index,
            reason: reason.into(),
        }
    }
}

/// Errors raised while writing cards into a record store.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("store unavailable during {operation}: {source}")]
    StoreUnavailable {
        operation: &'static str,
        #[source]
        source: StoreFailure,
    },
}

/// Errors returned by a whole import run.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Sync(#[from] SyncError),
}

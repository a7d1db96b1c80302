//! Database error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("note not found: {0}")]
    NoteNotFound(i64),

    #[error("note type not found: {0}")]
    NoteTypeNotFound(i64),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

//! Core library for importing Pleco flashcard exports.
//!
//! Provides:
//! - Numeric pinyin to tone-mark conversion
//! - Private Use Area detection for dictionary glyphs
//! - XML and tab-delimited export parsers
//! - Idempotent create/update of cards in a note store
//! - Shared types (Flashcard, NoteContent, ImportConfig, etc.)

pub mod error;
pub mod import;
pub mod parser;
pub mod pua;
pub mod store;
pub mod sync;
pub mod tones;
pub mod types;

pub use error::{ImportError, ParseError, Result, SyncError, ToneError};
pub use import::{import_file, ImportRequest, ImportSummary};
pub use parser::{parse, parse_bytes, parse_file, ExportFormat};
pub use pua::contains_private_use;
pub use store::{
    CardId, CardTemplate, MemoryStore, MemoryStoreError, NoteFields, NoteId, NoteStore, NoteTypeId,
    NoteTypeSpec,
};
pub use sync::{NoteTypeCatalog, SyncOutcome, SyncRecord, SyncReport, Synchronizer, NEEDS_CHECK_TAG};
pub use tones::{render_sentence, render_syllable};
pub use types::{
    CardKind, CardStatus, Definition, Flashcard, ImportConfig, NoteContent, ParseOptions,
    ScriptPreference,
};

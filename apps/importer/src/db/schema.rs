//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema of the note collection.
pub const SCHEMA: &str = r#"
-- Decks (containers)
CREATE TABLE IF NOT EXISTS decks (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

-- Note types: field layout, card templates and stylesheet
CREATE TABLE IF NOT EXISTS note_types (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    fields TEXT NOT NULL,
    templates TEXT NOT NULL,
    css TEXT NOT NULL DEFAULT '',
    modified_at TEXT NOT NULL
);

-- Notes (records); fields and tags are JSON encoded
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY,
    guid TEXT NOT NULL UNIQUE,
    note_type_id INTEGER NOT NULL REFERENCES note_types(id),
    deck_id INTEGER NOT NULL REFERENCES decks(id),
    sort_field TEXT NOT NULL,
    checksum TEXT NOT NULL,
    fields TEXT NOT NULL,
    tags TEXT NOT NULL,
    modified_at TEXT NOT NULL
);

-- Cards (presentation units) with their learning status
CREATE TABLE IF NOT EXISTS cards (
    id INTEGER PRIMARY KEY,
    note_id INTEGER NOT NULL REFERENCES notes(id),
    deck_id INTEGER NOT NULL REFERENCES decks(id),
    ordinal INTEGER NOT NULL,
    status TEXT NOT NULL DEFAULT 'new',
    modified_at TEXT NOT NULL,
    UNIQUE (note_id, ordinal)
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_notes_lookup ON notes(note_type_id, deck_id, checksum);
CREATE INDEX IF NOT EXISTS idx_cards_note ON cards(note_id);
CREATE INDEX IF NOT EXISTS idx_cards_deck ON cards(deck_id);
"#;

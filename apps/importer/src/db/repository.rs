//! SQLite-backed note store.

use crate::db::error::DbError;
use crate::db::schema::{SCHEMA, SCHEMA_VERSION};
use chrono::Utc;
use pleco_core::store::{CardId, CardTemplate, NoteFields, NoteId, NoteStore, NoteTypeId, NoteTypeSpec};
use pleco_core::types::CardStatus;
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use std::path::Path;
use uuid::Uuid;

type Result<T> = std::result::Result<T, DbError>;

/// Note and card counts of one deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct DeckStats {
    pub deck: String,
    pub notes: usize,
    pub cards: usize,
    pub new_cards: usize,
}

/// Checksum used to look notes up by primary field.
pub fn field_checksum(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

/// SQLite implementation of [`NoteStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(SCHEMA)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
        Ok(())
    }

    fn deck_id(&self, name: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT OR IGNORE INTO decks (name) VALUES (?1)",
            params![name],
        )?;
        self.conn
            .query_row("SELECT id FROM decks WHERE name = ?1", params![name], |row| {
                row.get(0)
            })
            .map_err(Into::into)
    }

    fn templates(&self, note_type: i64) -> Result<Vec<CardTemplate>> {
        let json: String = self
            .conn
            .query_row(
                "SELECT templates FROM note_types WHERE id = ?1",
                params![note_type],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(DbError::NoteTypeNotFound(note_type))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Field values and tags of a note.
    pub fn note_fields(&self, id: NoteId) -> Result<Option<NoteFields>> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT fields, tags FROM notes WHERE id = ?1",
                params![id.0],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        row.map(|(fields, tags)| {
            Ok(NoteFields {
                values: serde_json::from_str(&fields)?,
                tags: serde_json::from_str(&tags)?,
            })
        })
        .transpose()
    }

    /// Note type of a note.
    pub fn note_type_of(&self, id: NoteId) -> Result<Option<NoteTypeId>> {
        self.conn
            .query_row(
                "SELECT note_type_id FROM notes WHERE id = ?1",
                params![id.0],
                |row| row.get(0).map(NoteTypeId),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Field names registered on a note type.
    pub fn note_type_fields(&self, id: NoteTypeId) -> Result<Vec<String>> {
        let json: String = self
            .conn
            .query_row(
                "SELECT fields FROM note_types WHERE id = ?1",
                params![id.0],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(DbError::NoteTypeNotFound(id.0))?;
        Ok(serde_json::from_str(&json)?)
    }

    fn generate_cards(&self, note: i64, deck: i64, note_type: i64, fields: &NoteFields) -> Result<usize> {
        let modified = now();
        let mut created = 0;
        for (ordinal, template) in self.templates(note_type)?.iter().enumerate() {
            if !template.generates_for(fields) {
                continue;
            }
            created += self.conn.execute(
                "INSERT OR IGNORE INTO cards (note_id, deck_id, ordinal, modified_at) VALUES (?1, ?2, ?3, ?4)",
                params![note, deck, ordinal as i64, modified],
            )?;
        }
        Ok(created)
    }

    /// Learning status of a card.
    pub fn get_card_status(&self, id: CardId) -> Result<Option<CardStatus>> {
        let status: Option<String> = self
            .conn
            .query_row("SELECT status FROM cards WHERE id = ?1", params![id.0], |row| {
                row.get(0)
            })
            .optional()?;
        status
            .map(|status| {
                CardStatus::parse(&status)
                    .ok_or_else(|| DbError::InvalidData(format!("unknown card status '{status}'")))
            })
            .transpose()
    }

    /// Overwrite the learning status of a card.
    pub fn set_card_status(&self, id: CardId, status: CardStatus) -> Result<()> {
        self.conn.execute(
            "UPDATE cards SET status = ?1, modified_at = ?2 WHERE id = ?3",
            params![status.as_str(), now(), id.0],
        )?;
        Ok(())
    }

    /// Counts for one deck; an unknown deck has zero of everything.
    pub fn deck_stats(&self, deck: &str) -> Result<DeckStats> {
        let (notes, cards, new_cards): (i64, i64, i64) = self.conn.query_row(
            "SELECT
                (SELECT COUNT(*) FROM notes n JOIN decks d ON d.id = n.deck_id WHERE d.name = ?1),
                COUNT(c.id),
                COALESCE(SUM(c.status = 'new'), 0)
             FROM cards c JOIN decks d ON d.id = c.deck_id
             WHERE d.name = ?1",
            params![deck],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;
        let count = |n: i64| usize::try_from(n).unwrap_or_default();
        Ok(DeckStats {
            deck: deck.to_string(),
            notes: count(notes),
            cards: count(cards),
            new_cards: count(new_cards),
        })
    }

    /// Total number of notes across all decks.
    pub fn note_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

impl NoteStore for SqliteStore {
    type Error = DbError;

    fn ensure_note_type(&mut self, spec: &NoteTypeSpec, fields: &[&str]) -> Result<NoteTypeId> {
        let templates = serde_json::to_string(&spec.templates)?;
        let existing: Option<(i64, String)> = self
            .conn
            .query_row(
                "SELECT id, fields FROM note_types WHERE name = ?1",
                params![spec.name],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        if let Some((id, stored_fields)) = existing {
            let mut names: Vec<String> = serde_json::from_str(&stored_fields)?;
            for field in fields {
                if !names.iter().any(|n| n == field) {
                    names.push((*field).to_string());
                }
            }
            self.conn.execute(
                "UPDATE note_types SET fields = ?1, templates = ?2, css = ?3, modified_at = ?4 WHERE id = ?5",
                params![serde_json::to_string(&names)?, templates, spec.css, now(), id],
            )?;
            tracing::debug!(note_type = %spec.name, id, "updated note type");
            return Ok(NoteTypeId(id));
        }

        self.conn.execute(
            "INSERT INTO note_types (name, fields, templates, css, modified_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![spec.name, serde_json::to_string(fields)?, templates, spec.css, now()],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(note_type = %spec.name, id, "created note type");
        Ok(NoteTypeId(id))
    }

    fn create_record(&mut self, note_type: NoteTypeId, fields: &NoteFields, container: &str) -> Result<NoteId> {
        let deck = self.deck_id(container)?;
        let primary = fields.primary();
        self.conn.execute(
            "INSERT INTO notes (guid, note_type_id, deck_id, sort_field, checksum, fields, tags, modified_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                Uuid::new_v4().to_string(),
                note_type.0,
                deck,
                primary,
                field_checksum(primary),
                serde_json::to_string(&fields.values)?,
                serde_json::to_string(&fields.tags)?,
                now()
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.generate_cards(id, deck, note_type.0, fields)?;
        Ok(NoteId(id))
    }

    fn find_records(&self, primary: &str, note_type: NoteTypeId, container: &str) -> Result<Vec<NoteId>> {
        let mut stmt = self.conn.prepare(
            "SELECT n.id FROM notes n
             JOIN decks d ON d.id = n.deck_id
             WHERE n.note_type_id = ?1 AND n.checksum = ?2 AND n.sort_field = ?3 AND d.name = ?4
             ORDER BY n.id",
        )?;
        let ids = stmt
            .query_map(
                params![note_type.0, field_checksum(primary), primary, container],
                |row| row.get(0).map(NoteId),
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ids)
    }

    fn update_record(&mut self, id: NoteId, fields: &NoteFields) -> Result<()> {
        let primary = fields.primary();
        let changed = self.conn.execute(
            "UPDATE notes SET sort_field = ?1, checksum = ?2, fields = ?3, tags = ?4, modified_at = ?5 WHERE id = ?6",
            params![
                primary,
                field_checksum(primary),
                serde_json::to_string(&fields.values)?,
                serde_json::to_string(&fields.tags)?,
                now(),
                id.0
            ],
        )?;
        if changed == 0 {
            return Err(DbError::NoteNotFound(id.0));
        }

        let (deck, note_type): (i64, i64) = self.conn.query_row(
            "SELECT deck_id, note_type_id FROM notes WHERE id = ?1",
            params![id.0],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        self.generate_cards(id.0, deck, note_type, fields)?;
        Ok(())
    }

    fn resolve_presentation_units(&self, id: NoteId, container: &str) -> Result<Vec<CardId>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id FROM cards c JOIN decks d ON d.id = c.deck_id
             WHERE c.note_id = ?1 AND d.name = ?2
             ORDER BY c.ordinal",
        )?;
        let ids = stmt
            .query_map(params![id.0, container], |row| row.get(0).map(CardId))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ids)
    }

    fn reset_to_new(&mut self, cards: &[CardId]) -> Result<()> {
        let modified = now();
        let tx = self.conn.transaction()?;
        for id in cards {
            tx.execute(
                "UPDATE cards SET status = ?1, modified_at = ?2 WHERE id = ?3",
                params![CardStatus::New.as_str(), modified, id.0],
            )?;
        }
        tx.commit()?;
        tracing::info!(cards = cards.len(), "reset cards to new");
        Ok(())
    }
}

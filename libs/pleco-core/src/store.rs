//! Record store collaborator.
//!
//! The synchronizer only talks to the destination note store through
//! [`NoteStore`]. [`MemoryStore`] is a complete in-process implementation
//! used by tests and by embedders that do not need persistence.

use crate::types::CardStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Identifier of a note type (field layout plus templates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoteTypeId(pub i64);

/// Identifier of a note (record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoteId(pub i64);

/// Identifier of a card (presentation unit) generated from a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub i64);

/// One card template of a note type. Front and back are opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub name: String,
    pub front: String,
    pub back: String,
    /// Only generate this card when the named field is non-empty.
    #[serde(default)]
    pub requires: Option<String>,
}

impl CardTemplate {
    /// Whether a note with `fields` gets a card from this template.
    pub fn generates_for(&self, fields: &NoteFields) -> bool {
        self.requires
            .as_deref()
            .map_or(true, |name| fields.get(name).is_some_and(|v| !v.is_empty()))
    }
}

/// Note type definition supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteTypeSpec {
    pub name: String,
    pub templates: Vec<CardTemplate>,
    #[serde(default)]
    pub css: String,
}

/// Ordered field values of a note plus its tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFields {
    pub values: Vec<(String, String)>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NoteFields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of the first field, the one duplicates are matched on.
    pub fn primary(&self) -> &str {
        self.values.first().map_or("", |(_, value)| value.as_str())
    }
}

/// Narrow interface onto the destination note store.
pub trait NoteStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create the note type if missing, add missing fields, and overwrite
    /// templates and stylesheet.
    fn ensure_note_type(&mut self, spec: &NoteTypeSpec, fields: &[&str]) -> Result<NoteTypeId, Self::Error>;

    /// Insert a note and generate its cards in `container`.
    fn create_record(
        &mut self,
        note_type: NoteTypeId,
        fields: &NoteFields,
        container: &str,
    ) -> Result<NoteId, Self::Error>;

    /// Notes of `note_type` created in `container` whose primary field
    /// equals `primary`. A note matches even when it has no cards.
    fn find_records(
        &self,
        primary: &str,
        note_type: NoteTypeId,
        container: &str,
    ) -> Result<Vec<NoteId>, Self::Error>;

    /// Replace every field of a note. Cards newly required by the fields are
    /// generated alongside the note's existing cards.
    fn update_record(&mut self, id: NoteId, fields: &NoteFields) -> Result<(), Self::Error>;

    /// Cards of a note that live in `container`.
    fn resolve_presentation_units(&self, id: NoteId, container: &str) -> Result<Vec<CardId>, Self::Error>;

    /// Forget the scheduling of the given cards.
    fn reset_to_new(&mut self, cards: &[CardId]) -> Result<(), Self::Error>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryStoreError {
    #[error("note not found: {0:?}")]
    NoteNotFound(NoteId),

    #[error("note type not found: {0:?}")]
    NoteTypeNotFound(NoteTypeId),

    #[error("card not found: {0:?}")]
    CardNotFound(CardId),
}

#[derive(Debug, Clone)]
pub struct StoredNoteType {
    pub spec: NoteTypeSpec,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct StoredNote {
    pub note_type: NoteTypeId,
    /// Container the note was created in; its cards live there too.
    pub container: String,
    pub fields: NoteFields,
}

#[derive(Debug, Clone)]
pub struct StoredCard {
    pub note: NoteId,
    pub container: String,
    pub ordinal: usize,
    pub status: CardStatus,
}

/// In-process note store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    note_types: BTreeMap<NoteTypeId, StoredNoteType>,
    notes: BTreeMap<NoteId, StoredNote>,
    cards: BTreeMap<CardId, StoredCard>,
    next_id: i64,
    reset_requests: Vec<Vec<CardId>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn note(&self, id: NoteId) -> Option<&StoredNote> {
        self.notes.get(&id)
    }

    pub fn card(&self, id: CardId) -> Option<&StoredCard> {
        self.cards.get(&id)
    }

    pub fn note_type(&self, id: NoteTypeId) -> Option<&StoredNoteType> {
        self.note_types.get(&id)
    }

    /// Every batch passed to [`NoteStore::reset_to_new`], oldest first.
    pub fn reset_requests(&self) -> &[Vec<CardId>] {
        &self.reset_requests
    }

    /// Overwrite the learning status of a card.
    pub fn set_card_status(&mut self, id: CardId, status: CardStatus) -> Result<(), MemoryStoreError> {
        let card = self.cards.get_mut(&id).ok_or(MemoryStoreError::CardNotFound(id))?;
        card.status = status;
        Ok(())
    }

    fn generate_cards(&mut self, note: NoteId) -> Result<(), MemoryStoreError> {
        let stored = self.notes.get(&note).ok_or(MemoryStoreError::NoteNotFound(note))?;
        let container = stored.container.clone();
        let note_type = self
            .note_types
            .get(&stored.note_type)
            .ok_or(MemoryStoreError::NoteTypeNotFound(stored.note_type))?;

        let missing: Vec<usize> = note_type
            .spec
            .templates
            .iter()
            .enumerate()
            .filter(|(_, template)| template.generates_for(&stored.fields))
            .map(|(ordinal, _)| ordinal)
            .filter(|ordinal| {
                !self
                    .cards
                    .values()
                    .any(|card| card.note == note && card.ordinal == *ordinal)
            })
            .collect();

        for ordinal in missing {
            let id = CardId(self.allocate());
            self.cards.insert(
                id,
                StoredCard {
                    note,
                    container: container.clone(),
                    ordinal,
                    status: CardStatus::New,
                },
            );
        }
        Ok(())
    }
}

impl NoteStore for MemoryStore {
    type Error = MemoryStoreError;

    fn ensure_note_type(&mut self, spec: &NoteTypeSpec, fields: &[&str]) -> Result<NoteTypeId, Self::Error> {
        let existing = self
            .note_types
            .iter_mut()
            .find(|(_, stored)| stored.spec.name == spec.name);

        if let Some((id, stored)) = existing {
            for field in fields {
                if !stored.fields.iter().any(|f| f == field) {
                    stored.fields.push((*field).to_string());
                }
            }
            stored.spec = spec.clone();
            return Ok(*id);
        }

        let id = NoteTypeId(self.allocate());
        self.note_types.insert(
            id,
            StoredNoteType {
                spec: spec.clone(),
                fields: fields.iter().map(|f| (*f).to_string()).collect(),
            },
        );
        Ok(id)
    }

    fn create_record(
        &mut self,
        note_type: NoteTypeId,
        fields: &NoteFields,
        container: &str,
    ) -> Result<NoteId, Self::Error> {
        if !self.note_types.contains_key(&note_type) {
            return Err(MemoryStoreError::NoteTypeNotFound(note_type));
        }
        let id = NoteId(self.allocate());
        self.notes.insert(
            id,
            StoredNote {
                note_type,
                container: container.to_string(),
                fields: fields.clone(),
            },
        );
        self.generate_cards(id)?;
        Ok(id)
    }

    fn find_records(
        &self,
        primary: &str,
        note_type: NoteTypeId,
        container: &str,
    ) -> Result<Vec<NoteId>, Self::Error> {
        Ok(self
            .notes
            .iter()
            .filter(|(_, note)| {
                note.note_type == note_type
                    && note.container == container
                    && note.fields.primary() == primary
            })
            .map(|(id, _)| *id)
            .collect())
    }

    fn update_record(&mut self, id: NoteId, fields: &NoteFields) -> Result<(), Self::Error> {
        let note = self.notes.get_mut(&id).ok_or(MemoryStoreError::NoteNotFound(id))?;
        note.fields = fields.clone();
        self.generate_cards(id)
    }

    fn resolve_presentation_units(&self, id: NoteId, container: &str) -> Result<Vec<CardId>, Self::Error> {
        if !self.notes.contains_key(&id) {
            return Err(MemoryStoreError::NoteNotFound(id));
        }
        Ok(self
            .cards
            .iter()
            .filter(|(_, card)| card.note == id && card.container == container)
            .map(|(card_id, _)| *card_id)
            .collect())
    }

    fn reset_to_new(&mut self, cards: &[CardId]) -> Result<(), Self::Error> {
        for id in cards {
            let card = self.cards.get_mut(id).ok_or(MemoryStoreError::CardNotFound(*id))?;
            card.status = CardStatus::New;
        }
        self.reset_requests.push(cards.to_vec());
        Ok(())
    }
}

impl StoredCard {
    pub fn is_new(&self) -> bool {
        self.status == CardStatus::New
    }
}

//! Merging parsed cards into a record store.
//!
//! Each card is matched against existing notes by headword, note type and
//! container. Unmatched cards are created; matched cards are either skipped
//! or overwritten depending on [`ImportConfig::overwrite`]. When cards were
//! overwritten and [`ImportConfig::set_new`] is on, all of their cards are
//! reset to new in one batch at the end of the run.

use crate::error::SyncError;
use crate::store::{CardId, NoteFields, NoteId, NoteStore, NoteTypeId, NoteTypeSpec};
use crate::types::{CardKind, Flashcard, ImportConfig, FIELD_NAMES, REVERSE_MARKER};
use serde::Serialize;
use std::collections::HashSet;

/// Tag added to notes whose definition needs manual review.
pub const NEEDS_CHECK_TAG: &str = "pleco::needs-check";

/// Result for one input card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    Created,
    UpdatedExisting,
    SkippedDuplicate,
}

/// Outcome of one card paired with the notes it touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncRecord {
    pub headword: String,
    pub outcome: SyncOutcome,
    pub note_ids: Vec<NoteId>,
}

/// Everything a sync run did, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub records: Vec<SyncRecord>,
    /// Cards reset to new after the run, empty unless `set_new` was on.
    pub reset_units: Vec<CardId>,
}

impl SyncReport {
    pub fn count(&self, outcome: SyncOutcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }
}

/// Note type definitions to use for each card kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTypeCatalog {
    pub dictionary: NoteTypeSpec,
    pub user: NoteTypeSpec,
}

impl NoteTypeCatalog {
    fn spec(&self, kind: CardKind) -> &NoteTypeSpec {
        match kind {
            CardKind::Dictionary => &self.dictionary,
            CardKind::User => &self.user,
        }
    }
}

/// Note types resolved so far in this run, at most one per card kind.
#[derive(Debug, Default)]
struct NoteTypeBuckets {
    dictionary: Option<NoteTypeId>,
    user: Option<NoteTypeId>,
}

impl NoteTypeBuckets {
    fn slot(&mut self, kind: CardKind) -> &mut Option<NoteTypeId> {
        match kind {
            CardKind::Dictionary => &mut self.dictionary,
            CardKind::User => &mut self.user,
        }
    }
}

fn store_error<E>(operation: &'static str) -> impl FnOnce(E) -> SyncError
where
    E: std::error::Error + Send + Sync + 'static,
{
    move |source| SyncError::StoreUnavailable {
        operation,
        source: Box::new(source),
    }
}

/// Writes flashcards into one container of a note store.
pub struct Synchronizer<'a, S: NoteStore> {
    store: &'a mut S,
    catalog: &'a NoteTypeCatalog,
    container: &'a str,
    buckets: NoteTypeBuckets,
}

impl<'a, S: NoteStore> Synchronizer<'a, S> {
    pub fn new(store: &'a mut S, catalog: &'a NoteTypeCatalog, container: &'a str) -> Self {
        Self {
            store,
            catalog,
            container,
            buckets: NoteTypeBuckets::default(),
        }
    }

    fn note_type(&mut self, kind: CardKind) -> Result<NoteTypeId, SyncError> {
        if let Some(id) = *self.buckets.slot(kind) {
            return Ok(id);
        }
        let spec = self.catalog.spec(kind);
        let id = self
            .store
            .ensure_note_type(spec, &FIELD_NAMES)
            .map_err(store_error("ensure_note_type"))?;
        tracing::debug!(note_type = %spec.name, ?kind, "resolved note type");
        *self.buckets.slot(kind) = Some(id);
        Ok(id)
    }

    fn fields_for(card: &Flashcard, config: &ImportConfig) -> NoteFields {
        let mut content = card.content.clone();
        if config.reverse {
            content.reverse = REVERSE_MARKER.to_string();
        }
        let values = FIELD_NAMES
            .iter()
            .map(|name| (*name).to_string())
            .zip(content.field_values())
            .collect();
        let tags = if card.needs_check {
            vec![NEEDS_CHECK_TAG.to_string()]
        } else {
            Vec::new()
        };
        NoteFields { values, tags }
    }

    fn sync_card(&mut self, card: &Flashcard, config: &ImportConfig) -> Result<SyncRecord, SyncError> {
        let note_type = self.note_type(card.kind)?;
        let fields = Self::fields_for(card, config);
        let headword = card.content.headword.clone();

        let existing = self
            .store
            .find_records(&headword, note_type, self.container)
            .map_err(store_error("find_records"))?;

        if existing.is_empty() {
            let id = self
                .store
                .create_record(note_type, &fields, self.container)
                .map_err(store_error("create_record"))?;
            return Ok(SyncRecord {
                headword,
                outcome: SyncOutcome::Created,
                note_ids: vec![id],
            });
        }

        let outcome = if config.overwrite {
            for id in &existing {
                self.store
                    .update_record(*id, &fields)
                    .map_err(store_error("update_record"))?;
            }
            SyncOutcome::UpdatedExisting
        } else {
            SyncOutcome::SkippedDuplicate
        };

        Ok(SyncRecord {
            headword,
            outcome,
            note_ids: existing,
        })
    }

    /// Create or update every card, in order.
    ///
    /// A store failure aborts the run; changes already made stay in the
    /// store, and re-running the import is safe because matching is by
    /// headword.
    pub fn sync(&mut self, cards: &[Flashcard], config: &ImportConfig) -> Result<SyncReport, SyncError> {
        let mut report = SyncReport::default();

        for card in cards {
            let record = self.sync_card(card, config)?;
            tracing::debug!(headword = %record.headword, outcome = ?record.outcome, "synced card");
            if card.needs_check {
                tracing::warn!(headword = %record.headword, "definition contains private-use glyphs");
            }
            report.records.push(record);
        }

        if config.set_new {
            report.reset_units = self.reset_updated(&report.records)?;
        }

        tracing::info!(
            created = report.count(SyncOutcome::Created),
            updated = report.count(SyncOutcome::UpdatedExisting),
            skipped = report.count(SyncOutcome::SkippedDuplicate),
            reset = report.reset_units.len(),
            container = self.container,
            "sync finished"
        );
        Ok(report)
    }

    fn reset_updated(&mut self, records: &[SyncRecord]) -> Result<Vec<CardId>, SyncError> {
        let mut seen = HashSet::new();
        let mut units = Vec::new();
        let updated = records
            .iter()
            .filter(|r| r.outcome == SyncOutcome::UpdatedExisting)
            .flat_map(|r| r.note_ids.iter().copied());

        for note in updated {
            if !seen.insert(note) {
                continue;
            }
            let cards = self
                .store
                .resolve_presentation_units(note, self.container)
                .map_err(store_error("resolve_presentation_units"))?;
            units.extend(cards);
        }

        if !units.is_empty() {
            self.store
                .reset_to_new(&units)
                .map_err(store_error("reset_to_new"))?;
        }
        Ok(units)
    }
}

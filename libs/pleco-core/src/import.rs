//! Caller-facing entry point: parse an export and merge it into a store.

use crate::error::ImportError;
use crate::parser::{self, ExportFormat};
use crate::store::NoteStore;
use crate::sync::{NoteTypeCatalog, SyncOutcome, SyncReport, Synchronizer};
use crate::types::{ImportConfig, ParseOptions};
use serde::Serialize;
use std::path::Path;

/// What one import run requested.
#[derive(Debug, Clone, Copy)]
pub struct ImportRequest<'a> {
    pub source: &'a Path,
    pub format: ExportFormat,
    pub container: &'a str,
    pub config: ImportConfig,
    pub options: ParseOptions,
}

/// Counts reported back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub parsed: usize,
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub needs_check: usize,
    pub reset_units: usize,
}

impl ImportSummary {
    fn from_report(parsed: usize, needs_check: usize, report: &SyncReport) -> Self {
        Self {
            parsed,
            created: report.count(SyncOutcome::Created),
            updated: report.count(SyncOutcome::UpdatedExisting),
            skipped: report.count(SyncOutcome::SkippedDuplicate),
            needs_check,
            reset_units: report.reset_units.len(),
        }
    }
}

/// Parse `request.source` and sync the cards into `store`.
///
/// Nothing is written when parsing fails.
pub fn import_file<S: NoteStore>(
    store: &mut S,
    catalog: &NoteTypeCatalog,
    request: &ImportRequest<'_>,
) -> Result<ImportSummary, ImportError> {
    tracing::info!(source = %request.source.display(), format = ?request.format, "reading export");
    let cards = parser::parse_file(request.source, request.format, request.options)?;
    let needs_check = cards.iter().filter(|c| c.needs_check).count();

    tracing::info!(cards = cards.len(), container = request.container, "syncing cards");
    let report = Synchronizer::new(store, catalog, request.container).sync(&cards, &request.config)?;

    Ok(ImportSummary::from_report(cards.len(), needs_check, &report))
}

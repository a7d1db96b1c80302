//! `import` command.

use crate::cli::ImportArgs;
use crate::config::Config;
use crate::db::SqliteStore;
use crate::templates;
use anyhow::Context;
use pleco_core::{import_file, ImportRequest, ImportSummary, NoteTypeCatalog};
use std::path::Path;

/// Run one import against the collection at `db_path`.
///
/// Blocking; parse errors leave the collection untouched.
pub fn import_export(
    db_path: &Path,
    catalog: &NoteTypeCatalog,
    args: &ImportArgs,
) -> anyhow::Result<ImportSummary> {
    let request = ImportRequest {
        source: &args.file,
        format: args.export_format()?,
        container: &args.deck,
        config: args.import_config(),
        options: args.parse_options(),
    };

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let mut store = SqliteStore::open(db_path)
        .with_context(|| format!("opening collection {}", db_path.display()))?;

    Ok(import_file(&mut store, catalog, &request)?)
}

fn print_summary(summary: &ImportSummary, args: &ImportArgs) {
    println!(
        "Imported {} cards from {} into deck '{}'",
        summary.parsed,
        args.file.display(),
        args.deck
    );
    println!("  created:      {:>5}", summary.created);
    println!("  updated:      {:>5}", summary.updated);
    println!("  skipped:      {:>5}", summary.skipped);
    println!("  needs check:  {:>5}", summary.needs_check);
    if args.set_new {
        println!("  reset to new: {:>5}", summary.reset_units);
    }
}

/// Handle `pleco-import import`.
pub async fn run_import(config: Config, args: ImportArgs, json: bool) -> anyhow::Result<()> {
    let catalog = templates::catalog(&config)?;
    let db_path = config.db_path.clone();
    let task_args = args.clone();

    let summary = tokio::task::spawn_blocking(move || import_export(&db_path, &catalog, &task_args))
        .await
        .context("import task failed")??;

    if json {
        super::print_json(&summary)
    } else {
        print_summary(&summary, &args);
        Ok(())
    }
}

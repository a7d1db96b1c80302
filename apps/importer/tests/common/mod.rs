//! Common test utilities for importer integration tests.
//!
//! Each test gets its own temporary directory holding the export files and
//! the SQLite collection.

#![allow(dead_code)]

pub mod fixtures;

use std::path::{Path, PathBuf};

use pleco_core::NoteTypeCatalog;
use pleco_import::cli::{FormatArg, ImportArgs, ScriptArg};
use pleco_import::config::Config;
use pleco_import::db::SqliteStore;
use pleco_import::templates;
use tempfile::TempDir;

pub const DECK: &str = "Chinese::Pleco";

pub struct TestContext {
    dir: TempDir,
    pub config: Config,
    pub catalog: NoteTypeCatalog,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = Config {
            db_path: dir.path().join("collection.db"),
            dictionary_note_type: "Pleco Dictionary".to_string(),
            user_note_type: "Pleco Custom".to_string(),
            template_dir: None,
        };
        let catalog = templates::catalog(&config).expect("built-in templates");
        Self {
            dir,
            config,
            catalog,
        }
    }

    /// Write an export file into the temp dir.
    pub fn write_export(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("write export");
        path
    }

    pub fn db_path(&self) -> &Path {
        &self.config.db_path
    }

    /// Open the collection the importer writes to.
    pub fn store(&self) -> SqliteStore {
        SqliteStore::open(self.db_path()).expect("open collection")
    }
}

/// Import arguments with every option off.
pub fn import_args(file: &Path) -> ImportArgs {
    ImportArgs {
        file: file.to_path_buf(),
        deck: DECK.to_string(),
        format: FormatArg::Auto,
        overwrite: false,
        set_new: false,
        reverse: false,
        script: ScriptArg::First,
    }
}

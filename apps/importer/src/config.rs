//! Environment-driven configuration.
//!
//! Values come from the process environment (optionally seeded from a
//! `.env` file) and fall back to defaults. Command-line flags override them.

use std::path::PathBuf;

pub const DEFAULT_DICTIONARY_NOTE_TYPE: &str = "Pleco Dictionary";
pub const DEFAULT_USER_NOTE_TYPE: &str = "Pleco Custom";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite collection file.
    pub db_path: PathBuf,
    pub dictionary_note_type: String,
    pub user_note_type: String,
    /// Directory with template overrides, see [`crate::templates`].
    pub template_dir: Option<PathBuf>,
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pleco-import")
        .join("collection.db")
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            db_path: var("PLECO_DB_PATH").map_or_else(default_db_path, PathBuf::from),
            dictionary_note_type: var("PLECO_DICT_NOTE_TYPE")
                .unwrap_or_else(|| DEFAULT_DICTIONARY_NOTE_TYPE.to_string()),
            user_note_type: var("PLECO_USER_NOTE_TYPE")
                .unwrap_or_else(|| DEFAULT_USER_NOTE_TYPE.to_string()),
            template_dir: var("PLECO_TEMPLATE_DIR").map(PathBuf::from),
        }
    }

    pub fn with_db_path(mut self, db_path: Option<PathBuf>) -> Self {
        if let Some(path) = db_path {
            self.db_path = path;
        }
        self
    }
}

//! Core types for the Pleco importer.

use serde::{Deserialize, Serialize};

/// Marker value of the `reverse` field that requests a reversed card.
pub const REVERSE_MARKER: &str = "y";

/// Field names shared by both note-type buckets, primary field first.
pub const FIELD_NAMES: [&str; 6] = ["headword", "pron", "defn", "notes", "audio", "reverse"];

/// Separator placed between gloss lines when a dictionary definition is stored.
pub const GLOSS_SEPARATOR: &str = "<br>";

/// Which headword variant to keep when an entry lists several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptPreference {
    /// Whatever variant the export lists first.
    #[default]
    FirstListed,
    Simplified,
    Traditional,
}

/// Options controlling how an export is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub script: ScriptPreference,
}

/// Origin of a flashcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// Content came from one of Pleco's built-in dictionaries.
    Dictionary,
    /// Content was typed by the user.
    User,
}

/// Definition text of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Definition {
    /// Ordered gloss lines of a dictionary entry.
    Glosses(Vec<String>),
    /// Opaque user-written text.
    Text(String),
}

impl Definition {
    /// Field value stored in the record store.
    pub fn to_field(&self) -> String {
        match self {
            Self::Glosses(lines) => lines.join(GLOSS_SEPARATOR),
            Self::Text(text) => text.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Glosses(lines) => lines.iter().all(|line| line.trim().is_empty()),
            Self::Text(text) => text.is_empty(),
        }
    }
}

/// Canonical per-card payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteContent {
    pub headword: String,
    pub pronunciation: String,
    pub definition: Definition,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub audio: String,
    /// `"y"` when a reversed card is wanted, empty otherwise.
    #[serde(default)]
    pub reverse: String,
}

impl NoteContent {
    pub fn new(headword: String, pronunciation: String, definition: Definition) -> Self {
        Self {
            headword,
            pronunciation,
            definition,
            notes: String::new(),
            audio: String::new(),
            reverse: String::new(),
        }
    }

    /// Values in [`FIELD_NAMES`] order.
    pub fn field_values(&self) -> [String; 6] {
        [
            self.headword.clone(),
            self.pronunciation.clone(),
            self.definition.to_field(),
            self.notes.clone(),
            self.audio.clone(),
            self.reverse.clone(),
        ]
    }
}

/// One parsed card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub content: NoteContent,
    pub kind: CardKind,
    /// Definition holds private-use glyphs that will not render downstream.
    pub needs_check: bool,
}

impl Flashcard {
    pub fn dictionary(content: NoteContent, needs_check: bool) -> Self {
        Self {
            content,
            kind: CardKind::Dictionary,
            needs_check,
        }
    }

    pub fn user(content: NoteContent) -> Self {
        Self {
            content,
            kind: CardKind::User,
            needs_check: false,
        }
    }

    pub fn dict_type(&self) -> bool {
        self.kind == CardKind::Dictionary
    }
}

/// User-selected options for one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Update existing notes with the same headword instead of skipping them.
    pub overwrite: bool,
    /// Reset the scheduling of overwritten notes to new.
    pub set_new: bool,
    /// Request the reversed card variant.
    pub reverse: bool,
}

/// Learning status of one presentation unit (card).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    #[default]
    New,
    Learning,
    Review,
    Relearning,
}

impl CardStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Learning => "learning",
            Self::Review => "review",
            Self::Relearning => "relearning",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Self::New),
            "learning" => Some(Self::Learning),
            "review" => Some(Self::Review),
            "relearning" => Some(Self::Relearning),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn glosses_join_with_separator() {
        let definition = Definition::Glosses(vec!["to love".into(), "affection".into()]);
        assert_eq!(definition.to_field(), "to love<br>affection");
    }

    #[test]
    fn blank_glosses_count_as_empty() {
        assert!(Definition::Glosses(vec![" ".into(), String::new()]).is_empty());
        assert!(!Definition::Text("x".into()).is_empty());
    }

    #[test]
    fn field_values_follow_field_names() {
        let mut content = NoteContent::new(
            "爱".into(),
            "ài".into(),
            Definition::Text("love".into()),
        );
        content.reverse = REVERSE_MARKER.into();
        let values = content.field_values();
        assert_eq!(values[0], "爱");
        assert_eq!(values[2], "love");
        assert_eq!(values[FIELD_NAMES.len() - 1], "y");
    }

    #[test]
    fn card_status_round_trips_through_text() {
        for status in [
            CardStatus::New,
            CardStatus::Learning,
            CardStatus::Review,
            CardStatus::Relearning,
        ] {
            assert_eq!(CardStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CardStatus::parse("suspended"), None);
    }

    #[test]
    fn default_status_is_new() {
        assert_eq!(CardStatus::default(), CardStatus::New);
    }
}

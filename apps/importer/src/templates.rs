//! Note type templates.
//!
//! Built-in templates are compiled in. A template directory can override any
//! of `front.html`, `back.html`, `reverse_front.html`, `reverse_back.html` and
//! `card.css`; files that are absent keep the built-in text.

use crate::config::Config;
use anyhow::Context;
use pleco_core::{CardTemplate, NoteTypeCatalog, NoteTypeSpec};
use std::path::Path;

const FRONT: &str = include_str!("../templates/front.html");
const BACK: &str = include_str!("../templates/back.html");
const REVERSE_FRONT: &str = include_str!("../templates/reverse_front.html");
const REVERSE_BACK: &str = include_str!("../templates/reverse_back.html");
const CSS: &str = include_str!("../templates/card.css");

/// Field that switches the reverse card on.
pub const REVERSE_FIELD: &str = "reverse";

fn load(dir: Option<&Path>, file: &str, builtin: &str) -> anyhow::Result<String> {
    let Some(path) = dir.map(|d| d.join(file)).filter(|p| p.exists()) else {
        return Ok(builtin.to_string());
    };
    std::fs::read_to_string(&path).with_context(|| format!("reading template {}", path.display()))
}

fn spec(name: &str, templates: &[CardTemplate], css: &str) -> NoteTypeSpec {
    NoteTypeSpec {
        name: name.to_string(),
        templates: templates
            .iter()
            .map(|t| CardTemplate {
                name: format!("{name} {}", t.name),
                ..t.clone()
            })
            .collect(),
        css: css.to_string(),
    }
}

/// Build the note types for dictionary and user cards.
pub fn catalog(config: &Config) -> anyhow::Result<NoteTypeCatalog> {
    let dir = config.template_dir.as_deref();
    let templates = [
        CardTemplate {
            name: "Recognition".to_string(),
            front: load(dir, "front.html", FRONT)?,
            back: load(dir, "back.html", BACK)?,
            requires: None,
        },
        CardTemplate {
            name: "Reverse".to_string(),
            front: load(dir, "reverse_front.html", REVERSE_FRONT)?,
            back: load(dir, "reverse_back.html", REVERSE_BACK)?,
            requires: Some(REVERSE_FIELD.to_string()),
        },
    ];
    let css = load(dir, "card.css", CSS)?;

    Ok(NoteTypeCatalog {
        dictionary: spec(&config.dictionary_note_type, &templates, &css),
        user: spec(&config.user_note_type, &templates, &css),
    })
}

//! XML export reader.

use super::{select_headword, Headword};
use crate::error::{ParseError, Result};
use crate::pua::contains_private_use;
use crate::tones::render_sentence;
use crate::types::{Definition, Flashcard, NoteContent, ParseOptions};
use roxmltree::{Document, Node};

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

fn text_of(node: Node<'_, '_>) -> String {
    node.text().unwrap_or_default().to_string()
}

pub(super) fn parse(content: &str, options: ParseOptions) -> Result<Vec<Flashcard>> {
    let doc = Document::parse(content)
        .map_err(|e| ParseError::unreadable(format!("invalid XML: {e}")))?;

    let root = doc.root_element();
    let cards = if root.has_tag_name("cards") {
        root
    } else {
        child(root, "cards").ok_or_else(|| ParseError::unreadable("no <cards> element"))?
    };

    cards
        .children()
        .filter(Node::is_element)
        .enumerate()
        .map(|(index, card)| parse_card(index, card, options))
        .collect()
}

fn parse_card(index: usize, card: Node<'_, '_>, options: ParseOptions) -> Result<Flashcard> {
    // Element order inside <entry> varies between Pleco versions; look
    // children up by name.
    let entry = child(card, "entry").ok_or_else(|| ParseError::malformed(index, "missing <entry>"))?;

    let headwords: Vec<Headword> = entry
        .children()
        .filter(|n| n.has_tag_name("headword"))
        .map(|h| Headword {
            charset: h.attribute("charset").map(str::to_string),
            text: text_of(h).trim().to_string(),
        })
        .collect();
    let headword = select_headword(&headwords, options.script)
        .ok_or_else(|| ParseError::malformed(index, "missing <headword>"))?
        .to_string();

    let pron = child(entry, "pron").ok_or_else(|| ParseError::malformed(index, "missing <pron>"))?;
    let defn = child(entry, "defn").ok_or_else(|| ParseError::malformed(index, "missing <defn>"))?;

    let pronunciation = render_sentence(text_of(pron).trim())?;
    if pronunciation.trim().is_empty() {
        return Err(ParseError::malformed(index, "empty <pron>"));
    }
    let defn = text_of(defn);

    let card = if child(card, "dictref").is_some() {
        dictionary_card(index, headword, pronunciation, &defn)?
    } else {
        Flashcard::user(NoteContent::new(headword, pronunciation, Definition::Text(defn)))
    };
    tracing::trace!(index, headword = %card.content.headword, kind = ?card.kind, "parsed card");
    Ok(card)
}

fn dictionary_card(index: usize, headword: String, pronunciation: String, defn: &str) -> Result<Flashcard> {
    let glosses = Definition::Glosses(
        defn.split('\n')
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect(),
    );
    if glosses.is_empty() {
        return Err(ParseError::malformed(index, "empty <defn> on dictionary card"));
    }
    let needs_check = contains_private_use(defn);
    Ok(Flashcard::dictionary(
        NoteContent::new(headword, pronunciation, glosses),
        needs_check,
    ))
}

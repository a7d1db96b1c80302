//! Tab-delimited text export reader.
//!
//! One card per line: `HEADWORD<TAB>PRONUNCIATION<TAB>DEFINITION`. A headword
//! may carry its traditional form in brackets, `简体[簡體]`.

use super::{select_headword, Headword, SIMPLIFIED_CHARSET, TRADITIONAL_CHARSET};
use crate::error::{ParseError, Result};
use crate::tones::render_sentence;
use crate::types::{Definition, Flashcard, NoteContent, ParseOptions};
use regex::Regex;
use std::sync::LazyLock;

static CARD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<simp>[\p{Han}，。]+)(?:\[(?P<trad>[\p{Han}，。]+)\])?\t(?P<pron>[A-Za-z1-5'’·,:\- ]+)\t(?P<defn>.*)$",
    )
    .expect("valid card line pattern")
});

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '\'' | '’' | '·' | '-')
}

fn pronunciation_tokens(pron: &str) -> usize {
    pron.split(is_separator).filter(|t| !t.is_empty()).count()
}

pub(super) fn parse(content: &str, options: ParseOptions) -> Result<Vec<Flashcard>> {
    let mut cards = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;
        let Some(caps) = CARD_LINE.captures(line) else {
            if !line.trim().is_empty() {
                tracing::debug!(line = line_num, "skipping line that is not a card");
            }
            continue;
        };

        let pron = caps["pron"].trim();
        if pronunciation_tokens(pron) == 1 {
            return Err(ParseError::UnsupportedLine {
                line: line_num,
                reason: "dictionary card bodies in text exports are not supported; export as XML"
                    .to_string(),
            });
        }

        let mut variants = vec![Headword {
            charset: Some(SIMPLIFIED_CHARSET.to_string()),
            text: caps["simp"].to_string(),
        }];
        if let Some(trad) = caps.name("trad") {
            variants.push(Headword {
                charset: Some(TRADITIONAL_CHARSET.to_string()),
                text: trad.as_str().to_string(),
            });
        }
        let headword = select_headword(&variants, options.script)
            .unwrap_or(&caps["simp"])
            .to_string();

        let pronunciation = render_sentence(pron)?;
        if pronunciation.trim().is_empty() {
            return Err(ParseError::malformed(line_num, "pronunciation has no syllables"));
        }

        cards.push(Flashcard::user(NoteContent::new(
            headword,
            pronunciation,
            Definition::Text(caps["defn"].to_string()),
        )));
    }

    Ok(cards)
}

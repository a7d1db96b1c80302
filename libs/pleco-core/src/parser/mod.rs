//! Pleco flashcard export parser.
//!
//! Two export formats are understood:
//!
//! ```text
//! XML:   <plecoflash><cards><card><entry>
//!          <headword charset="sc">你好</headword>
//!          <pron>ni3hao3</pron>
//!          <defn>hello</defn>
//!        </entry><dictref .../></card></cards></plecoflash>
//!
//! Text:  你好<TAB>ni3 hao3<TAB>hello
//! ```
//!
//! Cards come back in file order. Duplicate headwords are kept.

mod text;
mod xml;

use crate::error::{ParseError, Result};
use crate::types::{Flashcard, ParseOptions, ScriptPreference};
use std::path::Path;

/// Charset attribute Pleco uses for simplified headwords.
pub const SIMPLIFIED_CHARSET: &str = "sc";

/// Charset attribute Pleco uses for traditional headwords.
pub const TRADITIONAL_CHARSET: &str = "tc";

/// Source format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xml,
    DelimitedText,
}

impl ExportFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xml") => Ok(Self::Xml),
            Some("txt" | "tsv") => Ok(Self::DelimitedText),
            _ => Err(ParseError::unreadable(format!(
                "cannot tell export format of {}",
                path.display()
            ))),
        }
    }
}

/// One headword variant as listed in the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Headword {
    pub charset: Option<String>,
    pub text: String,
}

/// Pick the headword variant according to `preference`, falling back to the
/// first listed variant.
pub(crate) fn select_headword(variants: &[Headword], preference: ScriptPreference) -> Option<&str> {
    let mut present = variants.iter().filter(|h| !h.text.is_empty());
    let preferred = match preference {
        ScriptPreference::FirstListed => None,
        ScriptPreference::Simplified => present
            .clone()
            .find(|h| h.charset.as_deref() == Some(SIMPLIFIED_CHARSET)),
        ScriptPreference::Traditional => present
            .clone()
            .find(|h| h.charset.as_deref() != Some(SIMPLIFIED_CHARSET)),
    };
    preferred.or_else(|| present.next()).map(|h| h.text.as_str())
}

/// Parse export content that is already in memory.
pub fn parse(content: &str, format: ExportFormat, options: ParseOptions) -> Result<Vec<Flashcard>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let cards = match format {
        ExportFormat::Xml => xml::parse(content, options)?,
        ExportFormat::DelimitedText => text::parse(content, options)?,
    };
    tracing::debug!(count = cards.len(), ?format, "parsed export");
    Ok(cards)
}

/// Parse raw export bytes, which must be UTF-8.
pub fn parse_bytes(bytes: &[u8], format: ExportFormat, options: ParseOptions) -> Result<Vec<Flashcard>> {
    let content = std::str::from_utf8(bytes)
        .map_err(|e| ParseError::unreadable(format!("export is not valid UTF-8: {e}")))?;
    parse(content, format, options)
}

/// Read and parse an export file.
pub fn parse_file(path: &Path, format: ExportFormat, options: ParseOptions) -> Result<Vec<Flashcard>> {
    let bytes = std::fs::read(path)
        .map_err(|e| ParseError::unreadable(format!("{}: {e}", path.display())))?;
    parse_bytes(&bytes, format, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variants() -> Vec<Headword> {
        vec![
            Headword {
                charset: Some(TRADITIONAL_CHARSET.to_string()),
                text: "愛".to_string(),
            },
            Headword {
                charset: Some(SIMPLIFIED_CHARSET.to_string()),
                text: "爱".to_string(),
            },
        ]
    }

    #[test]
    fn first_listed_ignores_charset() {
        assert_eq!(
            select_headword(&variants(), ScriptPreference::FirstListed),
            Some("愛")
        );
    }

    #[test]
    fn simplified_preference_finds_sc_variant() {
        assert_eq!(
            select_headword(&variants(), ScriptPreference::Simplified),
            Some("爱")
        );
    }

    #[test]
    fn traditional_preference_skips_sc_variant() {
        let mut reversed = variants();
        reversed.reverse();
        assert_eq!(
            select_headword(&reversed, ScriptPreference::Traditional),
            Some("愛")
        );
    }

    #[test]
    fn preference_falls_back_to_first_listed() {
        let only_simplified = vec![Headword {
            charset: Some(SIMPLIFIED_CHARSET.to_string()),
            text: "爱".to_string(),
        }];
        assert_eq!(
            select_headword(&only_simplified, ScriptPreference::Traditional),
            Some("爱")
        );
        assert_eq!(select_headword(&[], ScriptPreference::Simplified), None);
    }

    #[test]
    fn empty_variants_are_skipped() {
        let variants = vec![
            Headword {
                charset: Some(SIMPLIFIED_CHARSET.to_string()),
                text: String::new(),
            },
            Headword {
                charset: Some(TRADITIONAL_CHARSET.to_string()),
                text: "愛".to_string(),
            },
        ];
        for preference in [
            ScriptPreference::FirstListed,
            ScriptPreference::Simplified,
            ScriptPreference::Traditional,
        ] {
            assert_eq!(select_headword(&variants, preference), Some("愛"));
        }
        assert_eq!(select_headword(&variants[..1], ScriptPreference::FirstListed), None);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("deck.XML")).unwrap(),
            ExportFormat::Xml
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("deck.txt")).unwrap(),
            ExportFormat::DelimitedText
        );
        assert!(matches!(
            ExportFormat::from_path(Path::new("deck.csv")),
            Err(ParseError::SourceUnreadable { .. })
        ));
    }

    #[test]
    fn rejects_invalid_utf8() {
        let result = parse_bytes(&[0xff, 0xfe, 0x00], ExportFormat::Xml, ParseOptions::default());
        assert!(matches!(result, Err(ParseError::SourceUnreadable { .. })));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let result = parse_file(
            Path::new("/nonexistent/flash.xml"),
            ExportFormat::Xml,
            ParseOptions::default(),
        );
        assert!(matches!(result, Err(ParseError::SourceUnreadable { .. })));
    }
}

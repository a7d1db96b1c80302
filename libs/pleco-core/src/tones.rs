//! Numeric pinyin to tone-marked pinyin.
//!
//! A syllable such as `hao3` becomes `hǎo`. The mark goes on `a` if present,
//! else on `e`, else on the `o` of an adjacent `ou`/`uo` pair, else on the
//! last vowel. Tone 5 (and anything outside 1-5) leaves the vowel unmarked.

use crate::error::ToneError;
use regex::Regex;
use std::sync::LazyLock;

const VOWELS: &str = "aeiouü";

const TONE_MARKS: [(char, [char; 5]); 6] = [
    ('a', ['ā', 'á', 'ǎ', 'à', 'a']),
    ('e', ['ē', 'é', 'ě', 'è', 'e']),
    ('i', ['ī', 'í', 'ǐ', 'ì', 'i']),
    ('o', ['ō', 'ó', 'ǒ', 'ò', 'o']),
    ('u', ['ū', 'ú', 'ǔ', 'ù', 'u']),
    ('ü', ['ǖ', 'ǘ', 'ǚ', 'ǜ', 'ü']),
];

/// A run of at least two ASCII letters with an optional tone digit.
static SYLLABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z]{2,})([1-5])?").expect("valid syllable pattern"));

/// Neutral tone, used when a syllable carries no digit.
pub const NEUTRAL_TONE: u8 = 5;

fn toned_vowel(vowel: char, tone: u8) -> char {
    let index = if (1..=5).contains(&tone) {
        usize::from(tone - 1)
    } else {
        usize::from(NEUTRAL_TONE - 1)
    };
    TONE_MARKS
        .iter()
        .find(|(base, _)| *base == vowel)
        .map_or(vowel, |(_, marks)| marks[index])
}

/// Place the tone mark for `tone` on a single syllable.
///
/// Letter case is kept per position, so `render_syllable("Ni", 3)` gives `Nǐ`.
pub fn render_syllable(letters: &str, tone: u8) -> Result<String, ToneError> {
    let mut chars = Vec::with_capacity(letters.len());
    let mut uppercase = Vec::with_capacity(letters.len());
    for c in letters.chars() {
        uppercase.push(c.is_uppercase());
        chars.push(c.to_lowercase().next().unwrap_or(c));
    }

    let last = |vowel: char| chars.iter().rposition(|&c| c == vowel);

    let target = if let Some(a) = last('a') {
        a
    } else if let Some(e) = last('e') {
        e
    } else {
        match (last('o'), last('u')) {
            (Some(o), Some(u)) if o.abs_diff(u) == 1 => o,
            _ => chars
                .iter()
                .rposition(|&c| VOWELS.contains(c))
                .ok_or_else(|| ToneError::NoVowel {
                    syllable: letters.to_string(),
                })?,
        }
    };

    chars[target] = toned_vowel(chars[target], tone);

    Ok(chars
        .into_iter()
        .zip(uppercase)
        .map(|(c, upper)| {
            if upper {
                c.to_uppercase().next().unwrap_or(c)
            } else {
                c
            }
        })
        .collect())
}

/// Render every numbered syllable of a single space-free word.
///
/// Text that is not part of a letter run (digits 6-9, punctuation, single
/// letters) is dropped.
fn render_word(word: &str) -> Result<String, ToneError> {
    let mut rendered = String::with_capacity(word.len());
    for caps in SYLLABLE.captures_iter(word) {
        let tone = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(NEUTRAL_TONE);
        rendered.push_str(&render_syllable(&caps[1], tone)?);
    }
    Ok(rendered)
}

/// Render a space-separated numeric pinyin string.
///
/// The number of space-separated words is preserved.
pub fn render_sentence(text: &str) -> Result<String, ToneError> {
    let words = text
        .split(' ')
        .map(render_word)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(words.join(" "))
}

//! Private Use Area detection.
//!
//! Pleco encodes some dictionary glyphs (part-of-speech icons, custom
//! markers) as private-use code points. They have no portable rendering, so
//! their presence flags a dictionary definition for manual review.

/// Whether `c` has the Unicode general category `Co` (Private Use).
pub fn is_private_use(c: char) -> bool {
    matches!(
        u32::from(c),
        0xE000..=0xF8FF | 0xF_0000..=0xF_FFFD | 0x10_0000..=0x10_FFFD
    )
}

/// Whether any code point in `text` is a private-use character.
pub fn contains_private_use(text: &str) -> bool {
    text.chars().any(is_private_use)
}

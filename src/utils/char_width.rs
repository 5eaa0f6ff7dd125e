//! Character width classification for the answer sheet grid
//!
//! Hangul and every other non-ASCII character fill a whole cell, ASCII
//! characters fill half a cell. This is a heuristic, not the Unicode East
//! Asian Width property, and stored documents depend on it staying that way.

use serde::{Deserialize, Serialize};

/// Width of one character in grid cells
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CharWidth {
    Half,
    Full,
}

impl CharWidth {
    /// Width in half-cells (1 or 2), used for exact accumulation
    pub fn half_cells(self) -> u32 {
        match self {
            CharWidth::Half => 1,
            CharWidth::Full => 2,
        }
    }

    /// Width in cells (0.5 or 1)
    pub fn cells(self) -> f32 {
        half_cells_to_cells(self.half_cells())
    }
}

/// Coarse character category used in sheet statistics
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CharKind {
    Hangul,
    Latin,
    Digit,
    Space,
    Symbol,
    /// Non-ASCII, non-Hangul (CJK ideographs, full-width punctuation, ...)
    Wide,
}

/// Hangul syllables, Jamo and compatibility Jamo
pub fn is_hangul(c: char) -> bool {
    matches!(c,
        '\u{AC00}'..='\u{D7A3}'
        | '\u{1100}'..='\u{11FF}'
        | '\u{3130}'..='\u{318F}')
}

pub fn kind_of(c: char) -> CharKind {
    if is_hangul(c) {
        CharKind::Hangul
    } else if !c.is_ascii() {
        CharKind::Wide
    } else if c.is_ascii_alphabetic() {
        CharKind::Latin
    } else if c.is_ascii_digit() {
        CharKind::Digit
    } else if c == ' ' || c == '\t' {
        CharKind::Space
    } else {
        CharKind::Symbol
    }
}

/// Classify a single character
pub fn width_of(c: char) -> CharWidth {
    match kind_of(c) {
        CharKind::Hangul | CharKind::Wide => CharWidth::Full,
        _ => CharWidth::Half,
    }
}

/// Classify a one-character string as handed over by JavaScript.
///
/// The empty string counts as half a cell. Only the first character of a
/// longer string is looked at.
pub fn width_of_str(s: &str) -> CharWidth {
    s.chars().next().map(width_of).unwrap_or(CharWidth::Half)
}

/// Total width of `text` in half-cells
pub fn text_half_cells(text: &str) -> u32 {
    text.chars().map(|c| width_of(c).half_cells()).sum()
}

/// Total width of `text` in cells
pub fn text_width(text: &str) -> f32 {
    half_cells_to_cells(text_half_cells(text))
}

pub fn half_cells_to_cells(half_cells: u32) -> f32 {
    half_cells as f32 / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hangul_is_full_width() {
        for c in ['가', '나', '힣', 'ㄱ', 'ㅎ', 'ㅏ', 'ㅣ', '\u{1100}', '\u{11FF}'] {
            assert_eq!(width_of(c), CharWidth::Full, "{:?}", c);
            assert_eq!(kind_of(c), CharKind::Hangul);
        }
    }

    #[test]
    fn test_ascii_is_half_width() {
        for c in ['a', 'Z', '0', '9', ' ', '-', '.', '(', '|'] {
            assert_eq!(width_of(c), CharWidth::Half, "{:?}", c);
        }
    }

    #[test]
    fn test_other_non_ascii_is_full_width() {
        assert_eq!(width_of('漢'), CharWidth::Full);
        assert_eq!(width_of('→'), CharWidth::Full);
        assert_eq!(width_of('é'), CharWidth::Full);
        assert_eq!(width_of('😀'), CharWidth::Full);
        assert_eq!(kind_of('漢'), CharKind::Wide);
    }

    #[test]
    fn test_width_of_str_edge_cases() {
        assert_eq!(width_of_str(""), CharWidth::Half);
        assert_eq!(width_of_str(" "), CharWidth::Half);
        assert_eq!(width_of_str("가"), CharWidth::Full);
    }

    #[test]
    fn test_text_width_mixes_half_and_full() {
        assert_eq!(text_width("가나다"), 3.0);
        assert_eq!(text_width("OAuth 2.0 인증"), 7.0);
        assert_eq!(text_width("abc"), 1.5);
        assert_eq!(text_width(""), 0.0);
    }

    #[test]
    fn test_kind_of_ascii_categories() {
        assert_eq!(kind_of('A'), CharKind::Latin);
        assert_eq!(kind_of('3'), CharKind::Digit);
        assert_eq!(kind_of(' '), CharKind::Space);
        assert_eq!(kind_of('-'), CharKind::Symbol);
    }
}

//! Greedy line wrapping against a cell budget
//!
//! `wrap` returns a lazy iterator over the input. Each produced line stays
//! within the budget, except when the budget is smaller than a single
//! character (a degenerate configuration): that character then gets a line
//! of its own.

use serde::{Deserialize, Serialize};
use std::str::CharIndices;

use super::char_width::{half_cells_to_cells, width_of};
use crate::models::MAX_CELLS_PER_LINE;

/// One wrapped line and its width in cells
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WrappedLine {
    pub text: String,
    pub cell_width: f32,
}

/// Iterator produced by [`wrap`]
#[derive(Clone, Debug)]
pub struct LineWrapper<'a> {
    text: &'a str,
    chars: CharIndices<'a>,
    budget_half_cells: u32,
}

/// Wrap `text` into lines of at most `max_cells` cells
pub fn wrap(text: &str, max_cells: u32) -> LineWrapper<'_> {
    LineWrapper {
        text,
        chars: text.char_indices(),
        budget_half_cells: max_cells.saturating_mul(2),
    }
}

/// Wrap `text` to the width of an answer sheet line
pub fn wrap_lines(text: &str) -> Vec<WrappedLine> {
    wrap(text, MAX_CELLS_PER_LINE).collect()
}

impl<'a> Iterator for LineWrapper<'a> {
    type Item = WrappedLine;

    fn next(&mut self) -> Option<WrappedLine> {
        let (start, first) = self.chars.next()?;
        let mut width = width_of(first).half_cells();
        let mut end = start + first.len_utf8();

        // Peek on a clone so the overflowing character seeds the next line.
        loop {
            let mut lookahead = self.chars.clone();
            let Some((idx, c)) = lookahead.next() else { break };
            let w = width_of(c).half_cells();
            if width.saturating_add(w) > self.budget_half_cells {
                break;
            }
            width += w;
            end = idx + c.len_utf8();
            self.chars = lookahead;
        }

        Some(WrappedLine {
            text: self.text[start..end].to_string(),
            cell_width: half_cells_to_cells(width),
        })
    }
}

impl std::iter::FusedIterator for LineWrapper<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_line() {
        let lines = wrap_lines("정보관리기술사");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "정보관리기술사");
        assert_eq!(lines[0].cell_width, 7.0);
    }

    #[test]
    fn test_breaks_when_budget_would_be_exceeded() {
        let text = "가".repeat(20);
        let lines = wrap_lines(&text);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].cell_width, 19.0);
        assert_eq!(lines[1].text, "가");
        assert_eq!(lines[1].cell_width, 1.0);
    }

    #[test]
    fn test_half_cell_boundary() {
        // 37 ASCII chars = 18.5 cells; a Hangul char would make 19.5.
        let text = format!("{}가", "a".repeat(37));
        let lines: Vec<_> = wrap(&text, 19).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].cell_width, 18.5);
        assert_eq!(lines[1].text, "가");

        // ...but a 38th ASCII char fits exactly.
        let lines: Vec<_> = wrap(&"a".repeat(38), 19).collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].cell_width, 19.0);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert_eq!(wrap("", 19).count(), 0);
    }

    #[test]
    fn test_zero_budget_gives_each_char_its_own_line() {
        let lines: Vec<_> = wrap("ab가", 0).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].cell_width, 1.0);
    }

    #[test]
    fn test_unbounded_budget_keeps_one_line() {
        let text = "가a".repeat(50);
        let lines: Vec<_> = wrap(&text, u32::MAX).collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].cell_width, 75.0);
    }

    #[test]
    fn test_restartable() {
        let text = "가나다라마바사아자차카타파하가나다라마바사";
        let first: Vec<_> = wrap(text, 5).collect();
        let second: Vec<_> = wrap(text, 5).collect();
        assert_eq!(first, second);
    }
}

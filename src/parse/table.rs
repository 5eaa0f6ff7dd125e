//! Recognition of pipe-delimited table lines (`| a | b |`)

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::MAX_CELLS_PER_LINE;

static SEPARATOR_CELL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^:?-+:?$").unwrap());

/// A line that starts and ends with `|`
pub fn is_table_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// Split a table line into trimmed cell texts
pub fn parse_table_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed
        .strip_prefix('|')
        .and_then(|s| s.strip_suffix('|'))
        .unwrap_or(trimmed);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// A `|---|:---:|` line between header and data rows
pub fn is_table_separator(line: &str) -> bool {
    is_table_line(line)
        && parse_table_row(line)
            .iter()
            .all(|cell| SEPARATOR_CELL_RE.is_match(cell))
}

/// Spread the line's cells evenly over `columns`, leftmost columns first
/// taking the remainder
pub fn distribute_column_widths(columns: usize) -> Vec<u32> {
    if columns == 0 {
        return Vec::new();
    }
    let columns_u32 = columns as u32;
    let base = MAX_CELLS_PER_LINE / columns_u32;
    let remainder = (MAX_CELLS_PER_LINE % columns_u32) as usize;
    (0..columns)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_line_recognition() {
        assert!(is_table_line("| a | b |"));
        assert!(is_table_line("  |x|  "));
        assert!(!is_table_line("|"));
        assert!(!is_table_line("a | b"));
        assert!(!is_table_line("| open"));
    }

    #[test]
    fn test_parse_row_trims_cells() {
        assert_eq!(parse_table_row("| 구분 |  설명 |"), vec!["구분", "설명"]);
        assert_eq!(parse_table_row("||"), vec![""]);
    }

    #[test]
    fn test_separator() {
        assert!(is_table_separator("|---|---|"));
        assert!(is_table_separator("| :--- | :-: | --: |"));
        assert!(!is_table_separator("| --- | x |"));
        assert!(!is_table_separator("| a | b |"));
    }

    #[test]
    fn test_column_widths_sum_to_line() {
        assert_eq!(distribute_column_widths(2), vec![10, 9]);
        assert_eq!(distribute_column_widths(3), vec![7, 6, 6]);
        assert_eq!(distribute_column_widths(4), vec![5, 5, 5, 4]);
        assert!(distribute_column_widths(0).is_empty());
    }
}

//! Parsing module: plain text to answer sheet blocks and back
//!
//! Runs of `| a | b |` lines (at least two, optionally with a `|---|`
//! separator) become table blocks; everything else becomes text blocks,
//! one grid line per input line. Conversion stops once the sheet's 22
//! lines are used up.

pub mod table;

use serde::{Deserialize, Serialize};

use crate::models::{AnswerSheetDocument, Block, BlockKind, LineNumber, MAX_LINES};

pub use table::*;

/// Convert plain text into a validated block document
pub fn parse_to_blocks(plain_text: &str) -> AnswerSheetDocument {
    let lines: Vec<&str> = plain_text.split('\n').collect();
    let mut blocks = Vec::new();
    let mut current_line: LineNumber = 1;
    let mut i = 0;

    while i < lines.len() && current_line <= MAX_LINES {
        if let Some((block, next)) = parse_table_block(&lines, i, current_line) {
            current_line = block.line_end().saturating_add(1);
            blocks.push(block);
            i = next;
            continue;
        }

        // Text run; always takes at least one line so a lone "| x |" is text.
        let text_start = current_line;
        let mut text_lines = Vec::new();
        while i < lines.len() && current_line <= MAX_LINES {
            if !text_lines.is_empty() && starts_table(&lines, i) {
                break;
            }
            text_lines.push(lines[i].to_string());
            i += 1;
            current_line += 1;
        }
        blocks.push(Block::text(text_lines, text_start));
    }

    if i < lines.len() {
        log::warn!(
            "Plain text has {} lines; {} did not fit on the sheet",
            lines.len(),
            lines.len() - i
        );
    }

    AnswerSheetDocument::from_blocks(blocks)
}

fn starts_table(lines: &[&str], index: usize) -> bool {
    index + 1 < lines.len() && is_table_line(lines[index]) && is_table_line(lines[index + 1])
}

/// Parse the table starting at `start_index`, returning it and the index of
/// the first line after it
fn parse_table_block(
    lines: &[&str],
    start_index: usize,
    line_start: LineNumber,
) -> Option<(Block, usize)> {
    if !starts_table(lines, start_index) {
        return None;
    }

    let end_index = lines[start_index..]
        .iter()
        .position(|line| !is_table_line(line))
        .map_or(lines.len(), |offset| start_index + offset);
    let table_lines = &lines[start_index..end_index];

    let headers = parse_table_row(table_lines[0]);
    let data_start = if is_table_separator(table_lines[1]) { 2 } else { 1 };

    let rows: Vec<Vec<String>> = table_lines[data_start..]
        .iter()
        .map(|line| parse_table_row(line))
        .filter(|row| {
            let keep = row.len() == headers.len();
            if !keep {
                log::debug!("Dropping table row with {} cells (header has {})", row.len(), headers.len());
            }
            keep
        })
        .collect();

    let column_widths = distribute_column_widths(headers.len());
    Some((Block::table(headers, rows, column_widths, line_start), end_index))
}

/// Render a document back to plain text; drawings have no text form
pub fn blocks_to_plain_text(doc: &AnswerSheetDocument) -> String {
    let mut result: Vec<String> = Vec::new();

    for block in &doc.blocks {
        match block {
            Block::Text(text) => result.extend(text.lines.iter().cloned()),
            Block::Table(table) => {
                result.push(format_row(&table.headers));
                result.push(format_row(&vec!["---".to_string(); table.headers.len()]));
                result.extend(table.rows.iter().map(|row| format_row(row)));
            }
            Block::Drawing(_) => {}
        }
    }

    result.join("\n")
}

fn format_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionStatistics {
    pub total_blocks: usize,
    pub text_blocks: usize,
    pub table_blocks: usize,
    pub drawing_blocks: usize,
    pub total_lines: i32,
}

/// What a plain-text import will produce, shown before it is applied
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionPreview {
    pub original: String,
    pub parsed: AnswerSheetDocument,
    pub plain_text_representation: String,
    pub warnings: Vec<String>,
    pub statistics: ConversionStatistics,
}

pub fn conversion_preview(plain_text: &str) -> ConversionPreview {
    let parsed = parse_to_blocks(plain_text);
    let count = |kind: BlockKind| parsed.blocks.iter().filter(|b| b.kind() == kind).count();

    let statistics = ConversionStatistics {
        total_blocks: parsed.blocks.len(),
        text_blocks: count(BlockKind::Text),
        table_blocks: count(BlockKind::Table),
        drawing_blocks: count(BlockKind::Drawing),
        total_lines: parsed.total_lines,
    };

    ConversionPreview {
        original: plain_text.to_string(),
        plain_text_representation: blocks_to_plain_text(&parsed),
        warnings: parsed.metadata.validation_warnings.clone(),
        statistics,
        parsed,
    }
}

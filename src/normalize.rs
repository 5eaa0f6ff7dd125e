//! Repair of AI/OCR-proposed documents before they are merged
//!
//! Drafts produced by the structuring model routinely get line spans or
//! table widths slightly wrong and pick up page numbers from scanned
//! sheets. Normalization fixes what it can, re-flows the blocks from line 1
//! and records every repair; the validator then decides whether the result
//! is acceptable.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{
    offset_line, AnswerSheetDocument, Block, DrawingBlock, ExcalidrawData, LineNumber, TableBlock,
    TextBlock, DEFAULT_COLUMN_WIDTH, MAX_CELLS_PER_LINE, MIN_COLUMN_WIDTH,
};

/// "4" or "4쪽" alone on a line
static PAGE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\s*쪽?$").unwrap());

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedDocument {
    pub document: AnswerSheetDocument,
    /// One message per repair that was applied
    pub adjustments: Vec<String>,
}

pub fn is_page_number_line(line: &str) -> bool {
    PAGE_NUMBER_RE.is_match(line.trim())
}

/// Normalize a candidate document and revalidate it
pub fn normalize_candidate(draft: AnswerSheetDocument) -> NormalizedDocument {
    let mut adjustments = Vec::new();
    let mut blocks = Vec::with_capacity(draft.blocks.len());
    let mut current_line: LineNumber = 1;

    for block in draft.blocks {
        let normalized = match block {
            Block::Text(text) => match normalize_text(text, &mut adjustments) {
                Some(text) => Block::Text(text),
                None => continue,
            },
            Block::Table(table) => Block::Table(normalize_table(table, &mut adjustments)),
            Block::Drawing(drawing) => Block::Drawing(normalize_drawing(drawing, &mut adjustments)),
        };

        let placed = normalized.shifted_to(current_line);
        current_line = offset_line(current_line, placed.line_count() as i64);
        blocks.push(placed);
    }

    if blocks.is_empty() {
        adjustments.push("All blocks were removed; created an empty text block".to_string());
        blocks.push(Block::text(vec![String::new()], 1));
    }

    let mut document = AnswerSheetDocument::from_blocks(blocks);
    if draft.left_margin.is_some() {
        document.left_margin = draft.left_margin;
        document.revalidate();
    }

    log::debug!(
        "Normalized candidate: {} blocks, {} adjustments, valid={}",
        document.blocks.len(),
        adjustments.len(),
        document.metadata.is_valid
    );

    NormalizedDocument {
        document,
        adjustments,
    }
}

fn normalize_text(mut text: TextBlock, adjustments: &mut Vec<String>) -> Option<TextBlock> {
    text.lines.retain(|line| !line.trim().is_empty());

    let (page_numbers, kept): (Vec<String>, Vec<String>) =
        text.lines.drain(..).partition(|line| is_page_number_line(line));
    if !page_numbers.is_empty() {
        adjustments.push(format!(
            "Removed page-number text from block {}: {}",
            text.id,
            page_numbers.join(" | ")
        ));
    }
    if kept.is_empty() {
        if !page_numbers.is_empty() {
            return None;
        }
        text.lines = vec![String::new()];
    } else {
        text.lines = kept;
    }

    let corrected_end = offset_line(text.line_start, text.lines.len() as i64 - 1);
    if corrected_end != text.line_end {
        adjustments.push(format!(
            "Text block {}: lineEnd corrected from {} to {}",
            text.id, text.line_end, corrected_end
        ));
        text.line_end = corrected_end;
    }
    Some(text)
}

fn normalize_table(mut table: TableBlock, adjustments: &mut Vec<String>) -> TableBlock {
    let columns = table.headers.len();
    if table.column_widths.len() != columns {
        adjustments.push(format!(
            "Table block {}: adjusted {} column widths to match {} headers",
            table.id,
            table.column_widths.len(),
            columns
        ));
        table.column_widths.resize(columns, DEFAULT_COLUMN_WIDTH);
    }

    if table.total_width() > MAX_CELLS_PER_LINE {
        if let Some((last, rest)) = table.column_widths.split_last_mut() {
            let used = rest.iter().fold(0u32, |total, &width| total.saturating_add(width));
            let allowed = MAX_CELLS_PER_LINE.saturating_sub(used).max(MIN_COLUMN_WIDTH);
            *last = allowed;
            let still_wide = used.saturating_add(allowed) > MAX_CELLS_PER_LINE;
            adjustments.push(if still_wide {
                format!(
                    "Table block {}: last column set to {} but the other columns already take {} of {} cells; table is still too wide",
                    table.id, allowed, used, MAX_CELLS_PER_LINE
                )
            } else {
                format!(
                    "Table block {}: column widths exceed {} cells, last column set to {}",
                    table.id, MAX_CELLS_PER_LINE, allowed
                )
            });
        }
    }

    let expected_end = offset_line(table.line_start, table.rows.len() as i64);
    if table.line_end != expected_end {
        adjustments.push(format!(
            "Table block {}: lineEnd corrected from {} to {}",
            table.id, table.line_end, expected_end
        ));
        table.line_end = expected_end;
    }
    table
}

fn normalize_drawing(mut drawing: DrawingBlock, adjustments: &mut Vec<String>) -> DrawingBlock {
    let data = &drawing.excalidraw_data;
    if data.elements.is_empty() && data.app_state.is_none() && data.files.is_none() {
        drawing.excalidraw_data = ExcalidrawData::blank();
    }

    if drawing.line_end < drawing.line_start {
        adjustments.push(format!(
            "Drawing block {}: empty line range {}-{} widened to one line",
            drawing.id, drawing.line_start, drawing.line_end
        ));
        drawing.line_end = drawing.line_start;
    }
    drawing
}

//! Structural checks of an answer sheet document
//!
//! Every check runs; nothing short-circuits. Errors come out in the order
//! bounds, overlap, content shape. Overlaps are reported for every
//! conflicting pair (i, j) with i < j, in stored block order.

use crate::models::{
    offset_line, AnswerSheetDocument, Block, TableBlock, TextBlock, LEFT_MARGIN_CELLS,
    MAX_CELLS_PER_LINE, MAX_LINES, MIN_COLUMN_WIDTH,
};
use crate::utils::{half_cells_to_cells, text_half_cells};

use super::{DiagnosticMark, Diagnostics};

/// Run every check over the document
pub fn diagnose(doc: &AnswerSheetDocument) -> Diagnostics {
    let mut diags = Diagnostics::new();

    diags.extend(check_line_bounds(&doc.blocks));
    diags.extend(check_overlaps(&doc.blocks));
    diags.extend(check_content_shape(&doc.blocks));
    diags.extend(check_total_lines(doc));
    diags.extend(check_grid_width(&doc.blocks));
    diags.extend(check_table_geometry(&doc.blocks));
    diags.extend(check_left_margin(doc));

    log::debug!(
        "Diagnosed {} blocks: {} marks (errors: {})",
        doc.blocks.len(),
        diags.marks.len(),
        diags.has_errors()
    );
    diags
}

/// Every block must satisfy `1 <= lineStart <= lineEnd <= 22`
pub fn check_line_bounds(blocks: &[Block]) -> Vec<DiagnosticMark> {
    let mut marks = Vec::new();

    for block in blocks {
        let (id, start, end) = (block.id(), block.line_start(), block.line_end());
        if start < 1 {
            marks.push(
                DiagnosticMark::error("line_bounds", format!("Block {} starts before line 1: {}", id, start))
                    .for_block(id)
                    .at_line(start),
            );
        }
        if end > MAX_LINES {
            marks.push(
                DiagnosticMark::error(
                    "line_bounds",
                    format!("Block {} ends after line {}: {}", id, MAX_LINES, end),
                )
                .for_block(id)
                .at_line(end),
            );
        }
        if start > end {
            marks.push(
                DiagnosticMark::error(
                    "line_bounds",
                    format!("Block {} start line {} is after end line {}", id, start, end),
                )
                .for_block(id)
                .at_line(start),
            );
        }
    }

    marks
}

/// No two blocks may share a grid line
pub fn check_overlaps(blocks: &[Block]) -> Vec<DiagnosticMark> {
    let mut marks = Vec::new();

    for (i, a) in blocks.iter().enumerate() {
        if a.line_start() > a.line_end() {
            continue;
        }
        for b in &blocks[i + 1..] {
            if b.line_start() > b.line_end() || !a.overlaps(b) {
                continue;
            }
            let first = a.line_start().max(b.line_start());
            let last = a.line_end().min(b.line_end());
            marks.push(
                DiagnosticMark::error(
                    "block_overlap",
                    format!("Blocks {} and {} overlap on lines {}-{}", a.id(), b.id(), first, last),
                )
                .for_block(b.id())
                .at_line(first),
            );
        }
    }

    marks
}

/// Text line counts and table arities must match the declared shape
pub fn check_content_shape(blocks: &[Block]) -> Vec<DiagnosticMark> {
    let mut marks = Vec::new();

    for block in blocks {
        match block {
            Block::Text(text) => {
                let span = block.line_count() as usize;
                if text.lines.len() != span {
                    marks.push(
                        DiagnosticMark::error(
                            "text_line_count",
                            format!(
                                "Text block {} has {} lines but spans {} lines",
                                text.id,
                                text.lines.len(),
                                span
                            ),
                        )
                        .for_block(&text.id),
                    );
                }
            }
            Block::Table(table) => marks.extend(check_table_arity(table)),
            Block::Drawing(_) => {}
        }
    }

    marks
}

fn check_table_arity(table: &TableBlock) -> Vec<DiagnosticMark> {
    let mut marks = Vec::new();
    let columns = table.headers.len();

    if table.column_widths.len() != columns {
        marks.push(
            DiagnosticMark::error(
                "table_column_widths",
                format!(
                    "Table block {} has {} column widths for {} headers",
                    table.id,
                    table.column_widths.len(),
                    columns
                ),
            )
            .for_block(&table.id),
        );
    }

    for (i, row) in table.rows.iter().enumerate() {
        if row.len() != columns {
            // Header occupies the first line; data rows follow.
            let line = offset_line(table.line_start, 1 + i as i64);
            marks.push(
                DiagnosticMark::error(
                    "table_row_arity",
                    format!(
                        "Table block {} row {} has {} cells, expected {}",
                        table.id,
                        i + 1,
                        row.len(),
                        columns
                    ),
                )
                .for_block(&table.id)
                .at_line(line),
            );
        }
    }

    marks
}

/// `totalLines` should equal the last line used by any block
pub fn check_total_lines(doc: &AnswerSheetDocument) -> Option<DiagnosticMark> {
    let last = doc.max_line_end();
    (doc.total_lines != last).then(|| {
        DiagnosticMark::warning(
            "total_lines_mismatch",
            format!(
                "Declared totalLines {} does not match last used line {}",
                doc.total_lines, last
            ),
        )
    })
}

/// Each text line should fit in the 19 cells of a grid line
pub fn check_grid_width(blocks: &[Block]) -> Vec<DiagnosticMark> {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::Text(text) => Some(text),
            _ => None,
        })
        .flat_map(overflowing_lines)
        .collect()
}

fn overflowing_lines(text: &TextBlock) -> Vec<DiagnosticMark> {
    let budget = MAX_CELLS_PER_LINE * 2;
    text.lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let width = text_half_cells(line);
            (width > budget).then(|| {
                let line_number = offset_line(text.line_start, i as i64);
                DiagnosticMark::warning(
                    "line_overflow",
                    format!(
                        "Line {} of block {} is {} cells wide (limit {})",
                        line_number,
                        text.id,
                        half_cells_to_cells(width),
                        MAX_CELLS_PER_LINE
                    ),
                )
                .for_block(&text.id)
                .at_line(line_number)
            })
        })
        .collect()
}

/// Soft checks on table layout: span, column budgets and cell contents
pub fn check_table_geometry(blocks: &[Block]) -> Vec<DiagnosticMark> {
    let mut marks = Vec::new();

    for table in blocks.iter().filter_map(|block| match block {
        Block::Table(table) => Some(table),
        _ => None,
    }) {
        let id = &table.id;
        let expected_end = offset_line(table.line_start, table.rows.len() as i64);
        if table.line_end != expected_end {
            marks.push(
                DiagnosticMark::warning(
                    "table_span",
                    format!(
                        "Table block {} has {} rows but ends on line {} (expected {})",
                        id,
                        1 + table.rows.len(),
                        table.line_end,
                        expected_end
                    ),
                )
                .for_block(id),
            );
        }

        if table.column_widths.iter().any(|&w| w < MIN_COLUMN_WIDTH) {
            marks.push(
                DiagnosticMark::warning(
                    "column_too_narrow",
                    format!("Table block {} has a column narrower than {} cell", id, MIN_COLUMN_WIDTH),
                )
                .for_block(id),
            );
        }

        let total = table.total_width();
        if total > MAX_CELLS_PER_LINE {
            marks.push(
                DiagnosticMark::warning(
                    "table_too_wide",
                    format!("Table block {} is {} cells wide (limit {})", id, total, MAX_CELLS_PER_LINE),
                )
                .for_block(id),
            );
        } else if total.saturating_mul(2) < MAX_CELLS_PER_LINE {
            marks.push(
                DiagnosticMark::warning(
                    "table_underused",
                    format!(
                        "Table block {} only uses {} of {} available cells",
                        id, total, MAX_CELLS_PER_LINE
                    ),
                )
                .for_block(id),
            );
        }

        let all_rows = std::iter::once(&table.headers).chain(table.rows.iter());
        for (row_index, row) in all_rows.enumerate() {
            let line = offset_line(table.line_start, row_index as i64);
            for (column, (cell, &budget)) in row.iter().zip(&table.column_widths).enumerate() {
                let width = text_half_cells(cell);
                if width > budget.saturating_mul(2) {
                    marks.push(
                        DiagnosticMark::warning(
                            "table_cell_overflow",
                            format!(
                                "Table block {} cell '{}' on line {} is {} cells wide but column {} allows {}",
                                id,
                                cell,
                                line,
                                half_cells_to_cells(width),
                                column + 1,
                                budget
                            ),
                        )
                        .for_block(id)
                        .at_line(line),
                    );
                }
            }
        }
    }

    marks
}

/// Left margin markers must sit on a grid line and fit the margin columns
pub fn check_left_margin(doc: &AnswerSheetDocument) -> Vec<DiagnosticMark> {
    let mut marks = Vec::new();

    for item in doc.left_margin.iter().flatten() {
        if item.line < 1 || item.line > MAX_LINES {
            marks.push(
                DiagnosticMark::warning(
                    "margin_line_bounds",
                    format!(
                        "Left margin marker '{}' is on line {} (sheet has {} lines)",
                        item.content, item.line, MAX_LINES
                    ),
                )
                .at_line(item.line),
            );
        }

        let width = text_half_cells(&item.content);
        if width > LEFT_MARGIN_CELLS * 2 {
            marks.push(
                DiagnosticMark::warning(
                    "margin_overflow",
                    format!(
                        "Left margin marker '{}' is {} cells wide (margin has {})",
                        item.content,
                        half_cells_to_cells(width),
                        LEFT_MARGIN_CELLS
                    ),
                )
                .at_line(item.line),
            );
        }
    }

    marks
}

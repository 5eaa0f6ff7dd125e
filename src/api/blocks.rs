//! Block constructors and document mutations
//!
//! Mutations take the document by value and return the updated copy with
//! `totalLines` and `metadata` already refreshed.

use wasm_bindgen::prelude::*;

use crate::{wasm_log, wasm_warn};
use crate::api::helpers::{api_error, deserialize, deserialize_optional, serialize};
use crate::models::{AnswerSheetDocument, Block, ExcalidrawData, LineNumber};
use crate::parse::distribute_column_widths;

/// Create a text block starting at `line_start`, one line per entry of `lines`
#[wasm_bindgen(js_name = createTextBlock)]
pub fn create_text_block(lines_js: JsValue, line_start: LineNumber) -> Result<JsValue, JsValue> {
    let lines: Vec<String> = deserialize(lines_js, "Invalid text lines")?;
    let block = Block::text(lines, line_start);
    wasm_log!("createTextBlock: {} lines {}-{}", block.line_count(), block.line_start(), block.line_end());
    serialize(&block, "Failed to serialize text block")
}

/// Create a table block
///
/// # Parameters
/// - `headers_js`: header cell texts
/// - `rows_js`: data rows
/// - `column_widths_js`: cell budget per column; omitted widths are spread
///   evenly over the line
/// - `line_start`: first grid line (the header row)
#[wasm_bindgen(js_name = createTableBlock)]
pub fn create_table_block(
    headers_js: JsValue,
    rows_js: JsValue,
    column_widths_js: JsValue,
    line_start: LineNumber,
) -> Result<JsValue, JsValue> {
    let headers: Vec<String> = deserialize(headers_js, "Invalid table headers")?;
    let rows: Vec<Vec<String>> = deserialize(rows_js, "Invalid table rows")?;
    let column_widths = deserialize_optional::<Vec<u32>>(column_widths_js, "Invalid column widths")?
        .unwrap_or_else(|| distribute_column_widths(headers.len()));

    let block = Block::table(headers, rows, column_widths, line_start);
    wasm_log!("createTableBlock: lines {}-{}", block.line_start(), block.line_end());
    serialize(&block, "Failed to serialize table block")
}

/// Create a drawing block over `line_start..=line_end`; missing scene data
/// gives a blank canvas
#[wasm_bindgen(js_name = createDrawingBlock)]
pub fn create_drawing_block(
    data_js: JsValue,
    line_start: LineNumber,
    line_end: LineNumber,
) -> Result<JsValue, JsValue> {
    let data = deserialize_optional::<ExcalidrawData>(data_js, "Invalid drawing data")?
        .unwrap_or_else(ExcalidrawData::blank);
    let block = Block::drawing(data, line_start, line_end);
    serialize(&block, "Failed to serialize drawing block")
}

#[wasm_bindgen(js_name = createEmptyAnswerSheet)]
pub fn create_empty_answer_sheet() -> Result<JsValue, JsValue> {
    serialize(&AnswerSheetDocument::new(), "Failed to serialize document")
}

/// Insert a block in line order and return the revalidated document
#[wasm_bindgen(js_name = insertBlock)]
pub fn insert_block(document_js: JsValue, block_js: JsValue) -> Result<JsValue, JsValue> {
    let mut doc: AnswerSheetDocument = deserialize(document_js, "Invalid document")?;
    let block: Block = deserialize(block_js, "Invalid block")?;

    let metadata = doc.insert_block(block);
    if !metadata.is_valid {
        wasm_warn!("insertBlock: document now has {} errors", metadata.validation_errors.len());
    }
    serialize(&doc, "Failed to serialize document")
}

/// Replace the block with id `block_id` and return the revalidated document
#[wasm_bindgen(js_name = replaceBlock)]
pub fn replace_block(
    document_js: JsValue,
    block_id: &str,
    block_js: JsValue,
) -> Result<JsValue, JsValue> {
    let mut doc: AnswerSheetDocument = deserialize(document_js, "Invalid document")?;
    let block: Block = deserialize(block_js, "Invalid block")?;

    doc.replace_block(block_id, block).map_err(api_error)?;
    serialize(&doc, "Failed to serialize document")
}

/// Remove the block with id `block_id` and return the revalidated document
#[wasm_bindgen(js_name = removeBlock)]
pub fn remove_block(document_js: JsValue, block_id: &str) -> Result<JsValue, JsValue> {
    let mut doc: AnswerSheetDocument = deserialize(document_js, "Invalid document")?;

    let removed = doc.remove_block(block_id).map_err(api_error)?;
    wasm_log!("removeBlock: removed {} block {}", removed.kind().as_str(), removed.id());
    serialize(&doc, "Failed to serialize document")
}

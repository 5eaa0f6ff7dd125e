//! Character width and line wrapping

use wasm_bindgen::prelude::*;

use crate::wasm_log;
use crate::api::helpers::serialize;
use crate::models::MAX_CELLS_PER_LINE;
use crate::utils::{text_width, width_of_str, wrap, WrappedLine};

/// Width of the first character of `ch` in cells (0.5 or 1)
#[wasm_bindgen(js_name = calculateCharacterWidth)]
pub fn calculate_character_width(ch: &str) -> f32 {
    width_of_str(ch).cells()
}

/// Total width of `text` in cells
#[wasm_bindgen(js_name = calculateTextWidth)]
pub fn calculate_text_width(text: &str) -> f32 {
    text_width(text)
}

/// Wrap `text` into grid lines of at most `max_cells` cells (19 by default)
///
/// # Returns
/// Array of `{ text, cellWidth }`
#[wasm_bindgen(js_name = splitTextToLines)]
pub fn split_text_to_lines(text: &str, max_cells: Option<u32>) -> Result<JsValue, JsValue> {
    let max_cells = max_cells.unwrap_or(MAX_CELLS_PER_LINE);
    let lines: Vec<WrappedLine> = wrap(text, max_cells).collect();
    wasm_log!("splitTextToLines: {} chars -> {} lines", text.chars().count(), lines.len());
    serialize(&lines, "Failed to serialize wrapped lines")
}

//! Plain-text analysis, import/export and draft normalization

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::analysis::{analyze_sheet, FormattedMessages, GridConfig, LineStatus, SheetReport, SheetStats};
use crate::api::helpers::{deserialize, deserialize_optional, serialize};
use crate::models::AnswerSheetDocument;
use crate::{normalize, parse, wasm_info, wasm_log};

/// Result of `analyzeAnswerSheet`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SheetAnalysis {
    pub report: SheetReport,
    pub stats: SheetStats,
    /// Display status of each line, in order
    pub line_statuses: Vec<LineStatus>,
    pub messages: FormattedMessages,
}

/// Measure a plain-text answer line by line
///
/// # Parameters
/// - `content`: the answer text, lines separated by `\n`
/// - `config_js`: optional `GridConfig`; defaults to the lenient sheet limits
#[wasm_bindgen(js_name = analyzeAnswerSheet)]
pub fn analyze_answer_sheet(content: &str, config_js: JsValue) -> Result<JsValue, JsValue> {
    let config = deserialize_optional::<GridConfig>(config_js, "Invalid grid config")?
        .unwrap_or_default();
    let report = analyze_sheet(content, &config);
    wasm_log!(
        "analyzeAnswerSheet: {} lines, {} cells, valid={}",
        report.total_lines,
        report.total_cells,
        report.is_valid
    );

    let analysis = SheetAnalysis {
        stats: report.stats(),
        line_statuses: report.lines.iter().map(|line| line.status()).collect(),
        messages: report.format_messages(),
        report,
    };
    serialize(&analysis, "Failed to serialize sheet analysis")
}

/// Convert plain text (with `| a | b |` tables) into a block document
#[wasm_bindgen(js_name = parseToBlocks)]
pub fn parse_to_blocks(plain_text: &str) -> Result<JsValue, JsValue> {
    let doc = parse::parse_to_blocks(plain_text);
    serialize(&doc, "Failed to serialize document")
}

/// Render a block document back to plain text
#[wasm_bindgen(js_name = blocksToPlainText)]
pub fn blocks_to_plain_text(document_js: JsValue) -> Result<String, JsValue> {
    let doc: AnswerSheetDocument = deserialize(document_js, "Invalid document")?;
    Ok(parse::blocks_to_plain_text(&doc))
}

#[wasm_bindgen(js_name = getConversionPreview)]
pub fn get_conversion_preview(plain_text: &str) -> Result<JsValue, JsValue> {
    let preview = parse::conversion_preview(plain_text);
    serialize(&preview, "Failed to serialize conversion preview")
}

/// Repair and re-flow a proposed document
///
/// # Returns
/// `{ document, adjustments }`
#[wasm_bindgen(js_name = normalizeCandidate)]
pub fn normalize_candidate(draft_js: JsValue) -> Result<JsValue, JsValue> {
    let draft: AnswerSheetDocument = deserialize(draft_js, "Invalid candidate document")?;
    let normalized = normalize::normalize_candidate(draft);
    if !normalized.adjustments.is_empty() {
        wasm_info!("normalizeCandidate: {} adjustments", normalized.adjustments.len());
    }
    serialize(&normalized, "Failed to serialize normalized document")
}

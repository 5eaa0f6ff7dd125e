//! Validation, diagnostics and the persisted record

use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::{wasm_info, wasm_log, wasm_warn};
use crate::api::helpers::{deserialize, serialize};
use crate::diagnostics::{diagnose, validate};
use crate::models::AnswerSheetDocument;
use crate::storage;

/// Validate a document without modifying it
///
/// # Returns
/// `{ isValid, errors, warnings }`
#[wasm_bindgen(js_name = validateDocument)]
pub fn validate_document(document_js: JsValue) -> Result<JsValue, JsValue> {
    let doc: AnswerSheetDocument = deserialize(document_js, "Invalid document")?;
    let result = validate(&doc);
    wasm_log!(
        "validateDocument: valid={}, {} errors, {} warnings",
        result.is_valid,
        result.errors.len(),
        result.warnings.len()
    );
    serialize(&result, "Failed to serialize validation result")
}

/// Structured findings (severity, kind, block id, line) for highlighting
#[wasm_bindgen(js_name = diagnoseDocument)]
pub fn diagnose_document(document_js: JsValue) -> Result<JsValue, JsValue> {
    let doc: AnswerSheetDocument = deserialize(document_js, "Invalid document")?;
    let diagnostics = diagnose(&doc);
    serialize(&diagnostics.marks, "Failed to serialize diagnostics")
}

/// Project a document onto its persisted `{ blocks, totalLines, metadata }`
#[wasm_bindgen(js_name = serializeAnswerSheet)]
pub fn serialize_answer_sheet(document_js: JsValue) -> Result<JsValue, JsValue> {
    let doc: AnswerSheetDocument = deserialize(document_js, "Invalid document")?;
    serialize(&storage::to_storage(&doc), "Failed to serialize answer sheet")
}

/// Rebuild a document from a persisted record
///
/// # Returns
/// The document, or `null` when the record has no `blocks` array
#[wasm_bindgen(js_name = deserializeAnswerSheet)]
pub fn deserialize_answer_sheet(data_js: JsValue) -> Result<JsValue, JsValue> {
    if data_js.is_undefined() {
        return Ok(JsValue::NULL);
    }
    let data: Value = deserialize(data_js, "Invalid stored answer sheet")?;
    let doc = storage::from_storage(&data);
    if doc.is_none() {
        wasm_warn!("deserializeAnswerSheet: record has no blocks array");
    }
    serialize(&doc, "Failed to serialize document")
}

/// Revalidate a document and compute the summary columns stored with it
#[wasm_bindgen(js_name = prepareForStorage)]
pub fn prepare_for_storage(document_js: JsValue) -> Result<JsValue, JsValue> {
    let doc: AnswerSheetDocument = deserialize(document_js, "Invalid document")?;
    let prepared = storage::prepare_for_storage(&doc);
    wasm_info!(
        "prepareForStorage: {} lines, {} cells, valid={}",
        prepared.line_count,
        prepared.cell_count,
        prepared.is_valid_format
    );
    serialize(&prepared, "Failed to serialize storage preparation")
}

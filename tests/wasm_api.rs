//! WASM API tests
//!
//! The exports log through the browser console, so these only run under
//! `wasm-pack test`.

#![cfg(target_arch = "wasm32")]

use answer_sheet_wasm::api::*;
use answer_sheet_wasm::models::{AnswerSheetDocument, Block};
use answer_sheet_wasm::storage::StoragePreparation;
use answer_sheet_wasm::ValidationResult;
use serde_json::Value;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap()
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> T {
    serde_wasm_bindgen::from_value(value).unwrap()
}

#[wasm_bindgen_test]
fn test_character_and_text_width() {
    assert_eq!(calculate_character_width("가"), 1.0);
    assert_eq!(calculate_character_width("a"), 0.5);
    assert_eq!(calculate_character_width(""), 0.5);
    assert_eq!(calculate_text_width("가나다abc"), 4.5);
}

#[wasm_bindgen_test]
fn test_split_text_to_lines() {
    let lines: Vec<Value> = from_js(split_text_to_lines(&"가".repeat(20), None).unwrap());
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["cellWidth"], 19.0);
    assert_eq!(lines[1]["text"], "가");

    let narrow: Vec<Value> = from_js(split_text_to_lines("abcd", Some(1)).unwrap());
    assert_eq!(narrow.len(), 2);
}

#[wasm_bindgen_test]
fn test_build_document_through_api() {
    let doc = create_empty_answer_sheet().unwrap();
    let text = create_text_block(to_js(&vec!["가나다"]), 1).unwrap();
    let doc = insert_block(doc, text).unwrap();

    let table = create_table_block(
        to_js(&vec!["A", "B"]),
        to_js(&vec![vec!["1", "2"], vec!["3", "4"]]),
        JsValue::UNDEFINED,
        2,
    )
    .unwrap();
    let doc = insert_block(doc, table).unwrap();

    let drawing = create_drawing_block(JsValue::NULL, 5, 8).unwrap();
    let doc = insert_block(doc, drawing).unwrap();

    let parsed: AnswerSheetDocument = from_js(doc.clone());
    assert_eq!(parsed.blocks.len(), 3);
    assert_eq!(parsed.total_lines, 8);
    assert!(parsed.metadata.is_valid);

    let result: ValidationResult = from_js(validate_document(doc).unwrap());
    assert!(result.is_valid);
}

#[wasm_bindgen_test]
fn test_replace_and_remove_block() {
    let block = Block::text(vec!["one".into()], 1);
    let id = block.id().to_string();
    let doc = AnswerSheetDocument::from_blocks(vec![block]);

    let replacement = Block::text(vec!["one".into(), "two".into()], 1);
    let doc = replace_block(to_js(&doc), &id, to_js(&replacement)).unwrap();
    let parsed: AnswerSheetDocument = from_js(doc.clone());
    assert_eq!(parsed.total_lines, 2);

    assert!(remove_block(doc.clone(), "missing").is_err());

    let new_id = parsed.blocks[0].id().to_string();
    let emptied: AnswerSheetDocument = from_js(remove_block(doc, &new_id).unwrap());
    assert!(emptied.blocks.is_empty());
    assert_eq!(emptied.total_lines, 0);
}

#[wasm_bindgen_test]
fn test_overlap_is_reported_by_diagnostics() {
    let doc = AnswerSheetDocument::from_blocks(vec![
        Block::text(vec!["a".into(), "b".into(), "c".into()], 1),
        Block::text(vec!["c".into(), "d".into(), "e".into()], 3),
    ]);
    let marks: Vec<Value> = from_js(diagnose_document(to_js(&doc)).unwrap());
    assert!(marks
        .iter()
        .any(|m| m["kind"] == "block_overlap" && m["severity"] == "error" && m["line"] == 3));
}

#[wasm_bindgen_test]
fn test_storage_round_trip() {
    let doc = AnswerSheetDocument::from_blocks(vec![Block::text(vec!["가나다".into()], 1)]);

    let stored = serialize_answer_sheet(to_js(&doc)).unwrap();
    let record: Value = from_js(stored.clone());
    assert_eq!(record.as_object().unwrap().len(), 3);

    let restored: AnswerSheetDocument = from_js(deserialize_answer_sheet(stored).unwrap());
    assert_eq!(restored.blocks, doc.blocks);
    assert_eq!(restored.total_lines, 1);

    assert!(deserialize_answer_sheet(JsValue::from_f64(42.0)).unwrap().is_null());
    assert!(deserialize_answer_sheet(JsValue::UNDEFINED).unwrap().is_null());
}

#[wasm_bindgen_test]
fn test_prepare_for_storage() {
    let doc = AnswerSheetDocument::from_blocks(vec![Block::text(vec!["가나다".into()], 1)]);
    let prepared: StoragePreparation = from_js(prepare_for_storage(to_js(&doc)).unwrap());
    assert_eq!(prepared.line_count, 1);
    assert_eq!(prepared.cell_count, 3);
    assert!(prepared.is_valid_format);
}

#[wasm_bindgen_test]
fn test_conversion_exports() {
    let input = "개요\n| a | b |\n| 1 | 2 |";
    let doc = parse_to_blocks(input).unwrap();
    let text = blocks_to_plain_text(doc).unwrap();
    assert_eq!(text, "개요\n| a | b |\n| --- | --- |\n| 1 | 2 |");

    let preview: Value = from_js(get_conversion_preview(input).unwrap());
    assert_eq!(preview["statistics"]["tableBlocks"], 1);

    let analysis: Value = from_js(analyze_answer_sheet(input, JsValue::UNDEFINED).unwrap());
    assert_eq!(analysis["report"]["totalLines"], 3);
    assert_eq!(analysis["lineStatuses"][0], "success");
    assert_eq!(analysis["messages"]["hasErrors"], false);
}

#[wasm_bindgen_test]
fn test_normalize_candidate_export() {
    let draft = AnswerSheetDocument {
        blocks: vec![Block::text(vec!["본문".into(), "12".into()], 5)],
        ..AnswerSheetDocument::new()
    };
    let result: Value = from_js(normalize_candidate(to_js(&draft)).unwrap());
    assert_eq!(result["document"]["totalLines"], 1);
    assert_eq!(result["document"]["blocks"][0]["lineStart"], 1);
    assert_eq!(result["adjustments"].as_array().unwrap().len(), 2);

    assert!(normalize_candidate(JsValue::from_str("not a document")).is_err());
}

#[wasm_bindgen_test]
fn test_errors_reach_js_as_messages() {
    let err = validate_document(JsValue::from_str("not a document")).unwrap_err();
    assert!(err.as_string().unwrap().starts_with("Invalid document: "));

    let doc = AnswerSheetDocument::from_blocks(vec![Block::text(vec!["a".into()], 1)]);
    let err = remove_block(to_js(&doc), "missing").unwrap_err();
    assert_eq!(err.as_string().unwrap(), "Block not found: missing");
}

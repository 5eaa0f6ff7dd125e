//! Conversion between `AnswerSheetDocument` and its persisted JSON record
//!
//! Loading is tolerant: anything that is not an object with a `blocks`
//! array yields `None` instead of an error, and stored metadata is trusted
//! as-is (call `revalidate` to refresh it).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::serde_helpers::line_count_from_value;
use crate::models::{AnswerSheetDocument, Block, DocumentMetadata};
use crate::utils::text_half_cells;

/// Project a document onto exactly `{ blocks, totalLines, metadata }`
pub fn to_storage(doc: &AnswerSheetDocument) -> Value {
    json!({
        "blocks": doc.blocks,
        "totalLines": doc.total_lines,
        "metadata": doc.metadata,
    })
}

/// Rebuild a document from a persisted record.
///
/// Block entries that cannot be decoded are skipped.
pub fn from_storage(data: &Value) -> Option<AnswerSheetDocument> {
    let obj = data.as_object()?;
    let entries = obj.get("blocks")?.as_array()?;

    let mut blocks = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match Block::deserialize(entry) {
            Ok(block) => blocks.push(block),
            Err(e) => log::warn!("Skipping stored block #{}: {}", index, e),
        }
    }

    let metadata = match obj.get("metadata") {
        Some(value @ Value::Object(_)) => DocumentMetadata::deserialize(value).unwrap_or_else(|e| {
            log::warn!("Stored metadata unreadable, using defaults: {}", e);
            DocumentMetadata::default()
        }),
        _ => DocumentMetadata::default(),
    };

    Some(AnswerSheetDocument {
        blocks,
        left_margin: None,
        total_lines: line_count_from_value(obj.get("totalLines")),
        metadata,
    })
}

/// Encode the persisted record as a JSON string
pub fn to_storage_string(doc: &AnswerSheetDocument) -> Result<String, crate::AnswerSheetError> {
    Ok(serde_json::to_string(&to_storage(doc))?)
}

/// Like [`from_storage`], but starting from JSON text; unparsable text yields `None`
pub fn from_storage_str(json: &str) -> Option<AnswerSheetDocument> {
    match serde_json::from_str::<Value>(json) {
        Ok(value) => from_storage(&value),
        Err(e) => {
            log::warn!("Stored answer sheet is not valid JSON: {}", e);
            None
        }
    }
}

/// A document ready to be written, with the summary columns stored next to it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoragePreparation {
    pub document: AnswerSheetDocument,
    pub line_count: i32,
    pub cell_count: u32,
    pub is_valid_format: bool,
    pub format_warnings: Vec<String>,
}

/// Revalidate a copy of the document and compute its summary counts
pub fn prepare_for_storage(doc: &AnswerSheetDocument) -> StoragePreparation {
    let mut document = doc.clone();
    let validation = document.revalidate();

    StoragePreparation {
        line_count: document.total_lines,
        cell_count: cell_count(&document),
        is_valid_format: validation.is_valid,
        format_warnings: validation.warnings,
        document,
    }
}

/// Cells used on the sheet: text lines rounded up to whole cells, tables by
/// their column budgets, drawings not at all
pub fn cell_count(doc: &AnswerSheetDocument) -> u32 {
    doc.blocks
        .iter()
        .map(|block| match block {
            Block::Text(text) => text
                .lines
                .iter()
                .map(|line| text_half_cells(line).div_ceil(2))
                .fold(0u32, u32::saturating_add),
            Block::Table(table) => {
                let lines = u32::try_from(table.rows.len())
                    .map_or(u32::MAX, |rows| rows.saturating_add(1));
                table.total_width().saturating_mul(lines)
            }
            Block::Drawing(_) => 0,
        })
        .fold(0u32, u32::saturating_add)
}

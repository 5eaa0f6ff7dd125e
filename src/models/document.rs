//! The answer sheet document: ordered blocks plus cached validation metadata
//!
//! Every mutation goes through this type and recomputes `total_lines` and
//! `metadata` before returning, so callers never observe stale metadata.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::block::{Block, LineNumber};
use super::serde_helpers::deserialize_line_count;
use crate::diagnostics::{validate, ValidationResult};
use crate::error::AnswerSheetError;

/// Column of the left margin a marker is written in
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum MarginColumn {
    /// "문1)" / "답)"
    Question = 1,
    /// "1." / "2."
    Section = 2,
    /// "1)" / "2)"
    Item = 3,
}

/// Table-of-contents marker written in the left margin
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LeftMarginItem {
    pub line: LineNumber,
    pub column: MarginColumn,
    pub content: String,
}

/// Cached validation snapshot stored alongside the blocks
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentMetadata {
    pub is_valid: bool,
    pub validation_errors: Vec<String>,
    pub validation_warnings: Vec<String>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            is_valid: true,
            validation_errors: Vec::new(),
            validation_warnings: Vec::new(),
        }
    }
}

impl From<ValidationResult> for DocumentMetadata {
    fn from(result: ValidationResult) -> Self {
        Self {
            is_valid: result.is_valid,
            validation_errors: result.errors,
            validation_warnings: result.warnings,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSheetDocument {
    pub blocks: Vec<Block>,

    /// Runtime-only; not part of the persisted record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_margin: Option<Vec<LeftMarginItem>>,

    #[serde(default, deserialize_with = "deserialize_line_count")]
    pub total_lines: i32,

    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl Default for AnswerSheetDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerSheetDocument {
    /// Create an empty, valid document
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            left_margin: None,
            total_lines: 0,
            metadata: DocumentMetadata::default(),
        }
    }

    /// Build a document from blocks, computing totals and metadata
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut doc = Self {
            blocks,
            ..Self::new()
        };
        doc.refresh();
        doc
    }

    /// Highest line used by any block (0 when there are none)
    pub fn max_line_end(&self) -> i32 {
        self.blocks.iter().map(Block::line_end).max().unwrap_or(0)
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id() == id)
    }

    fn position(&self, id: &str) -> Result<usize, AnswerSheetError> {
        self.blocks
            .iter()
            .position(|b| b.id() == id)
            .ok_or_else(|| AnswerSheetError::BlockNotFound(id.to_string()))
    }

    /// Insert a block, keeping the sequence ordered by starting line.
    ///
    /// A block whose start ties with existing blocks goes after them.
    pub fn insert_block(&mut self, block: Block) -> &DocumentMetadata {
        let index = self
            .blocks
            .partition_point(|b| b.line_start() <= block.line_start());
        log::debug!("Inserting {} block {} at index {}", block.kind().as_str(), block.id(), index);
        self.blocks.insert(index, block);
        self.refresh();
        &self.metadata
    }

    /// Replace the block with the given id, returning the old block
    pub fn replace_block(&mut self, id: &str, block: Block) -> Result<Block, AnswerSheetError> {
        let index = self.position(id)?;
        let old = std::mem::replace(&mut self.blocks[index], block);
        self.refresh();
        Ok(old)
    }

    /// Remove the block with the given id
    pub fn remove_block(&mut self, id: &str) -> Result<Block, AnswerSheetError> {
        let index = self.position(id)?;
        let removed = self.blocks.remove(index);
        self.refresh();
        Ok(removed)
    }

    /// Set `total_lines` to the highest line any block ends on
    pub fn recompute_total_lines(&mut self) {
        self.total_lines = self.max_line_end();
    }

    /// Re-run validation and store the result in `metadata`
    pub fn revalidate(&mut self) -> ValidationResult {
        let result = validate(self);
        self.metadata = DocumentMetadata::from(result.clone());
        result
    }

    fn refresh(&mut self) {
        self.recompute_total_lines();
        self.revalidate();
    }
}

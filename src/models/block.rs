//! Content blocks placed on the answer sheet grid
//!
//! A block is a contiguous run of content (text, table or drawing) occupying
//! an inclusive range of grid lines. Blocks are value objects: editing a
//! block means building a new one and replacing the old by id.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::AnswerSheetError;

/// 1-based grid line number. Signed so that out-of-range values coming from
/// storage or an AI draft survive decoding and can be reported.
pub type LineNumber = i32;

/// `line + offset`, clamped to the `LineNumber` range
pub fn offset_line(line: LineNumber, offset: i64) -> LineNumber {
    (line as i64 + offset).clamp(LineNumber::MIN as i64, LineNumber::MAX as i64) as LineNumber
}

/// Discriminator of the block union
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Table,
    Drawing,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Table => "table",
            BlockKind::Drawing => "drawing",
        }
    }
}

/// Plain text, one entry per physical grid line
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub id: String,
    pub line_start: LineNumber,
    pub line_end: LineNumber,
    #[serde(default)]
    pub lines: Vec<String>,
}

/// Table with one grid line per header or data row
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableBlock {
    pub id: String,
    pub line_start: LineNumber,
    pub line_end: LineNumber,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
    /// Cell budget of each column
    #[serde(default)]
    pub column_widths: Vec<u32>,
}

impl TableBlock {
    /// Sum of all column budgets, saturating at `u32::MAX`
    pub fn total_width(&self) -> u32 {
        self.column_widths
            .iter()
            .fold(0u32, |total, &width| total.saturating_add(width))
    }
}

/// Scene data produced by the Excalidraw editor, kept opaque
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExcalidrawData {
    #[serde(default)]
    pub elements: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_state: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Value>,
}

impl ExcalidrawData {
    /// An empty white canvas
    pub fn blank() -> Self {
        Self {
            elements: Vec::new(),
            app_state: Some(serde_json::json!({ "viewBackgroundColor": "#ffffff" })),
            files: Some(serde_json::json!({})),
        }
    }
}

/// Free-hand drawing; its line range is chosen by the caller
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrawingBlock {
    pub id: String,
    pub line_start: LineNumber,
    pub line_end: LineNumber,
    #[serde(default)]
    pub excalidraw_data: ExcalidrawData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// A block on the answer sheet, tagged by `type` in JSON
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Text(TextBlock),
    Table(TableBlock),
    Drawing(DrawingBlock),
}

/// Generate a fresh block id such as `text-3f2a...`
pub fn new_block_id(kind: BlockKind) -> String {
    format!("{}-{}", kind.as_str(), Uuid::new_v4().simple())
}

impl Block {
    /// Create a text block starting at `line_start`, one grid line per entry
    pub fn text(lines: Vec<String>, line_start: LineNumber) -> Self {
        let line_end = offset_line(line_start, lines.len() as i64 - 1);
        Block::Text(TextBlock {
            id: new_block_id(BlockKind::Text),
            line_start,
            line_end,
            lines,
        })
    }

    /// Create a table block: the header row plus every data row take one line each
    pub fn table(
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        column_widths: Vec<u32>,
        line_start: LineNumber,
    ) -> Self {
        let line_end = offset_line(line_start, rows.len() as i64);
        Block::Table(TableBlock {
            id: new_block_id(BlockKind::Table),
            line_start,
            line_end,
            headers,
            rows,
            column_widths,
        })
    }

    /// Create a drawing block over an explicit line range
    pub fn drawing(data: ExcalidrawData, line_start: LineNumber, line_end: LineNumber) -> Self {
        Block::Drawing(DrawingBlock {
            id: new_block_id(BlockKind::Drawing),
            line_start,
            line_end,
            excalidraw_data: data,
            thumbnail: None,
        })
    }

    /// Create a drawing block `line_count` lines tall
    pub fn drawing_with_height(
        data: ExcalidrawData,
        line_start: LineNumber,
        line_count: u32,
    ) -> Result<Self, AnswerSheetError> {
        if line_count == 0 {
            return Err(AnswerSheetError::InvalidLineRange {
                start: line_start,
                end: offset_line(line_start, -1),
            });
        }
        Ok(Self::drawing(data, line_start, offset_line(line_start, line_count as i64 - 1)))
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Text(_) => BlockKind::Text,
            Block::Table(_) => BlockKind::Table,
            Block::Drawing(_) => BlockKind::Drawing,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Block::Text(b) => &b.id,
            Block::Table(b) => &b.id,
            Block::Drawing(b) => &b.id,
        }
    }

    pub fn line_start(&self) -> LineNumber {
        match self {
            Block::Text(b) => b.line_start,
            Block::Table(b) => b.line_start,
            Block::Drawing(b) => b.line_start,
        }
    }

    pub fn line_end(&self) -> LineNumber {
        match self {
            Block::Text(b) => b.line_end,
            Block::Table(b) => b.line_end,
            Block::Drawing(b) => b.line_end,
        }
    }

    /// Number of grid lines the declared range covers (0 if inverted)
    pub fn line_count(&self) -> u32 {
        (self.line_end() as i64 - self.line_start() as i64 + 1).clamp(0, u32::MAX as i64) as u32
    }

    /// Move the block so it starts at `line_start`, keeping its height
    pub fn shifted_to(&self, line_start: LineNumber) -> Self {
        let delta = line_start as i64 - self.line_start() as i64;
        let mut moved = self.clone();
        let (start, end) = match &mut moved {
            Block::Text(b) => (&mut b.line_start, &mut b.line_end),
            Block::Table(b) => (&mut b.line_start, &mut b.line_end),
            Block::Drawing(b) => (&mut b.line_start, &mut b.line_end),
        };
        *start = offset_line(*start, delta);
        *end = offset_line(*end, delta);
        moved
    }

    /// Whether the inclusive line ranges of two blocks intersect
    pub fn overlaps(&self, other: &Block) -> bool {
        self.line_start() <= other.line_end() && other.line_start() <= self.line_end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_text_block_span() {
        let block = Block::text(strings(&["가나다"]), 1);
        assert_eq!(block.line_start(), 1);
        assert_eq!(block.line_end(), 1);

        let block = Block::text(strings(&["a", "b", "c", "d"]), 7);
        assert_eq!(block.line_end(), 10);
        assert_eq!(block.line_count(), 4);
    }

    #[test]
    fn test_table_block_span() {
        let block = Block::table(
            strings(&["A", "B"]),
            vec![strings(&["1", "2"]), strings(&["3", "4"])],
            vec![3, 3],
            5,
        );
        assert_eq!(block.line_end(), 7);
        assert_eq!(block.kind(), BlockKind::Table);
    }

    #[test]
    fn test_drawing_block_uses_explicit_range() {
        let block = Block::drawing(ExcalidrawData::default(), 3, 8);
        assert_eq!(block.line_start(), 3);
        assert_eq!(block.line_end(), 8);

        let tall = Block::drawing_with_height(ExcalidrawData::blank(), 10, 4).unwrap();
        assert_eq!(tall.line_end(), 13);
        assert!(Block::drawing_with_height(ExcalidrawData::blank(), 10, 0).is_err());
    }

    #[test]
    fn test_fresh_ids_are_unique_and_prefixed() {
        let a = Block::text(strings(&["x"]), 1);
        let b = Block::text(strings(&["x"]), 1);
        assert_ne!(a.id(), b.id());
        assert!(a.id().starts_with("text-"));
        assert!(Block::drawing(ExcalidrawData::default(), 1, 1).id().starts_with("drawing-"));
    }

    #[test]
    fn test_overlaps_is_inclusive() {
        let a = Block::text(strings(&["1", "2", "3"]), 1);
        let b = Block::text(strings(&["3", "4", "5"]), 3);
        let c = Block::text(strings(&["6"]), 6);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_shifted_to_keeps_height() {
        let block = Block::text(strings(&["a", "b"]), 4);
        let moved = block.shifted_to(1);
        assert_eq!(moved.line_start(), 1);
        assert_eq!(moved.line_end(), 2);
        assert_eq!(moved.id(), block.id());
    }

    #[test]
    fn test_extreme_ranges_do_not_overflow() {
        let huge = Block::drawing(ExcalidrawData::default(), LineNumber::MIN, LineNumber::MAX);
        assert_eq!(huge.line_count(), u32::MAX);

        let moved = huge.shifted_to(1);
        assert_eq!(moved.line_start(), 1);
        assert_eq!(moved.line_end(), LineNumber::MAX);

        let low = Block::drawing(ExcalidrawData::default(), LineNumber::MIN, LineNumber::MIN + 2);
        assert_eq!(low.shifted_to(LineNumber::MAX).line_end(), LineNumber::MAX);

        let text = Block::text(strings(&["a", "b"]), LineNumber::MAX);
        assert_eq!(text.line_end(), LineNumber::MAX);
        let empty = Block::text(Vec::new(), LineNumber::MIN);
        assert_eq!(empty.line_end(), LineNumber::MIN);
    }

    #[test]
    fn test_table_width_saturates() {
        let table = TableBlock {
            id: "t".into(),
            line_start: 1,
            line_end: 1,
            headers: strings(&["A", "B"]),
            rows: Vec::new(),
            column_widths: vec![u32::MAX, 1],
        };
        assert_eq!(table.total_width(), u32::MAX);
    }

    #[test]
    fn test_json_shape_is_tagged() {
        let block = Block::text(strings(&["hi"]), 2);
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["lineStart"], 2);
        assert_eq!(json["lineEnd"], 2);
        assert_eq!(json["lines"][0], "hi");
    }
}

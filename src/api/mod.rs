//! Answer Sheet WASM API
//!
//! JavaScript-facing functions over the grid engine. Documents cross the
//! boundary as plain JSON-shaped objects; nothing is kept on the Rust side
//! between calls.
//!
//! # Module Structure
//!
//! - `helpers`: console logging, (de)serialization and error conversion
//! - `text`: character width and line wrapping
//! - `blocks`: block constructors and document mutations
//! - `document`: validation, diagnostics and the persisted record
//! - `conversion`: plain-text analysis, import/export and draft normalization

pub mod helpers;
pub mod text;
pub mod blocks;
pub mod document;
pub mod conversion;

pub use text::{calculate_character_width, calculate_text_width, split_text_to_lines};
pub use blocks::{
    create_drawing_block, create_empty_answer_sheet, create_table_block, create_text_block,
    insert_block, remove_block, replace_block,
};
pub use document::{
    deserialize_answer_sheet, diagnose_document, prepare_for_storage, serialize_answer_sheet,
    validate_document,
};
pub use conversion::{
    analyze_answer_sheet, blocks_to_plain_text, get_conversion_preview, normalize_candidate,
    parse_to_blocks,
};

//! Models module for the answer sheet
//!
//! Block union, document aggregate and the physical sheet constants.

pub mod block;
pub mod constants;
pub mod document;
pub mod serde_helpers;

// Re-export commonly used types
pub use block::*;
pub use constants::*;
pub use document::*;

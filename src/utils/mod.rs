//! Utility modules for the answer sheet
//!
//! Character width classification and line wrapping against the grid.

pub mod char_width;
pub mod line_wrap;

// Re-export commonly used types
pub use char_width::*;
pub use line_wrap::*;

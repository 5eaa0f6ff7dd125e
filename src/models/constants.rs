//! Physical answer sheet dimensions

/// Number of writing lines on one answer sheet
pub const MAX_LINES: i32 = 22;

/// Cells available on a single grid line
pub const MAX_CELLS_PER_LINE: u32 = 19;

/// Cells reserved on the left for question/section markers
pub const LEFT_MARGIN_CELLS: u32 = 3;

/// Smallest budget a table column may have
pub const MIN_COLUMN_WIDTH: u32 = 1;

/// Width given to table columns that arrive without one
pub const DEFAULT_COLUMN_WIDTH: u32 = 3;

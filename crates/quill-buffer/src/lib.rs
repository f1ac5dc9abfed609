//! # Quill Buffer
//!
//! Line-oriented text storage with a coalescing undo log.
//!
//! ## Pieces
//!
//! - [`LineStore`]: an ordered sequence of lines that never becomes empty
//! - [`Cursor`] and [`Position`]: a `(row, col)` handle with clamping moves
//! - [`UndoLog`]: a LIFO of [`Edit`] records that merges runs of typing
//!   and deleting into single undo steps
//!
//! Columns are counted in `char`s, never bytes.

mod cursor;
mod history;
mod lines;

pub use cursor::{Cursor, Direction, Position};
pub use history::{Change, DEFAULT_TAB_WIDTH, Edit, Inverse, UndoLog};
pub use lines::LineStore;

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Row {row} is out of bounds (document has {len} lines)")]
    RowOutOfBounds { row: usize, len: usize },

    #[error("Position {row}:{col} is out of bounds")]
    PositionOutOfBounds { row: usize, col: usize },

    #[error("Requested rows start={start}, count={count} are out of range")]
    RowOutOfRange { start: i64, count: i64 },

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

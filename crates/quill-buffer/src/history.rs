//! Undo history with coalescing of character runs.
//!
//! ## Learning: The Command Pattern
//!
//! Every edit the document performs is reported here as a [`Change`].
//! The log keeps a stack of [`Edit`] records and, on undo, hands back an
//! [`Inverse`]: the structural operation that reverts the record.
//!
//! Consecutive typing on one row becomes a single record, as does a run
//! of Delete presses at a fixed point or a run of Backspace presses. One
//! undo then reverts the whole run.
//!
//! There is no redo stack: a record is consumed by the undo that pops it.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Number of spaces a tab expands to unless configured otherwise.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// A single raw edit, as reported by the document right after performing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// `ch` was inserted; `col` is the cursor column after the insertion.
    ///
    /// A tab is reported as `'\t'` even though the line received spaces.
    Insert { row: usize, col: usize, ch: char },
    /// `ch` was removed from column `col`.
    Delete { row: usize, col: usize, ch: char },
    /// The line at `row` was split at `col`.
    Split { row: usize, col: usize },
    /// Row `row + 1` was appended to `row`, which had length `col`.
    Join { row: usize, col: usize },
}

/// An undoable record: one or more coalesced changes of a single kind.
///
/// ## Learning: Clone vs Copy
///
/// `Edit` implements `Clone` but not `Copy` because its runs are
/// `String`s, which own heap memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edit {
    /// `run` was typed and ends just before column `col`.
    Insert { row: usize, col: usize, run: String },
    /// `run` was removed starting at column `col`, in left-to-right order.
    Delete { row: usize, col: usize, run: String },
    /// A line was divided in two at `(row, col)`.
    Split { row: usize, col: usize },
    /// Two lines were merged with the join point at `(row, col)`.
    Join { row: usize, col: usize },
}

impl Edit {
    /// Returns the row the record applies to.
    pub fn row(&self) -> usize {
        match self {
            Edit::Insert { row, .. }
            | Edit::Delete { row, .. }
            | Edit::Split { row, .. }
            | Edit::Join { row, .. } => *row,
        }
    }
}

impl From<Change> for Edit {
    fn from(change: Change) -> Self {
        match change {
            Change::Insert { row, col, ch } => Edit::Insert {
                row,
                col,
                run: ch.to_string(),
            },
            Change::Delete { row, col, ch } => Edit::Delete {
                row,
                col,
                run: ch.to_string(),
            },
            Change::Split { row, col } => Edit::Split { row, col },
            Change::Join { row, col } => Edit::Join { row, col },
        }
    }
}

/// The operation that reverts a popped [`Edit`].
///
/// Applying it must not be reported back to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inverse {
    /// Remove `count` characters starting at `col`.
    Remove { row: usize, col: usize, count: usize },
    /// Insert `text` at `col`.
    Restore { row: usize, col: usize, text: String },
    /// Join row `row + 1` onto `row`.
    Join { row: usize, col: usize },
    /// Split `row` at `col`.
    Split { row: usize, col: usize },
}

impl Inverse {
    /// Where the cursor goes once the inverse has been applied.
    pub fn cursor(&self) -> Position {
        match self {
            Inverse::Remove { row, col, .. }
            | Inverse::Restore { row, col, .. }
            | Inverse::Join { row, col }
            | Inverse::Split { row, col } => Position::new(*row, *col),
        }
    }
}

/// LIFO log of [`Edit`] records.
///
/// Depth is unbounded; records are dropped when popped or on [`clear`].
///
/// The tab rule assumes a tab insertion is never interleaved with another
/// edit at the same boundary: a merged tab always advances the record by
/// exactly `tab_width` columns, and inversion counts it the same way.
///
/// [`clear`]: UndoLog::clear
#[derive(Debug, Clone)]
pub struct UndoLog {
    records: Vec<Edit>,
    tab_width: usize,
}

impl UndoLog {
    /// Creates an empty log using [`DEFAULT_TAB_WIDTH`].
    pub fn new() -> Self {
        Self::with_tab_width(DEFAULT_TAB_WIDTH)
    }

    /// Creates an empty log for a document that expands tabs to `tab_width` spaces.
    pub fn with_tab_width(tab_width: usize) -> Self {
        Self {
            records: Vec::new(),
            tab_width,
        }
    }

    /// Returns the tab width used for coalescing and inversion.
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Records a change, merging it into the top record when possible.
    pub fn submit(&mut self, change: Change) {
        if !self.coalesce(change) {
            self.records.push(Edit::from(change));
        }
    }

    /// Tries to fold `change` into the top record.
    fn coalesce(&mut self, change: Change) -> bool {
        let tab_width = self.tab_width;
        let top = self.records.last_mut();

        match change {
            Change::Insert { row, col, ch } => match top {
                Some(Edit::Insert {
                    row: top_row,
                    col: top_col,
                    run,
                }) if *top_row == row => {
                    if ch != '\t' && *top_col + 1 == col {
                        run.push(ch);
                    } else if ch == '\t' && *top_col + tab_width == col {
                        run.push_str(&" ".repeat(tab_width));
                    } else {
                        return false;
                    }
                    *top_col = col;
                    true
                }
                _ => false,
            },
            Change::Delete { row, col, ch } => match top {
                Some(Edit::Delete {
                    row: top_row,
                    col: top_col,
                    run,
                }) if *top_row == row => {
                    if *top_col == col {
                        // Delete key: the removed text continues to the right
                        run.push(ch);
                    } else if *top_col == col + 1 {
                        // Backspace: the removed text grows to the left
                        run.insert(0, ch);
                        *top_col = col;
                    } else {
                        return false;
                    }
                    true
                }
                _ => false,
            },
            Change::Split { .. } | Change::Join { .. } => false,
        }
    }

    /// Pops the top record and returns its inverse.
    ///
    /// Returns `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Inverse> {
        let inverse = match self.records.pop()? {
            Edit::Insert { row, col, run } => {
                let count = self.expanded_width(&run);
                Inverse::Remove {
                    row,
                    col: col.saturating_sub(count),
                    count,
                }
            }
            Edit::Delete { row, col, run } => Inverse::Restore {
                row,
                col,
                text: run,
            },
            Edit::Split { row, col } => Inverse::Join { row, col },
            Edit::Join { row, col } => Inverse::Split { row, col },
        };
        Some(inverse)
    }

    /// Number of columns a recorded run occupied in the line.
    fn expanded_width(&self, run: &str) -> usize {
        run.chars()
            .map(|ch| if ch == '\t' { self.tab_width } else { 1 })
            .sum()
    }

    /// Returns the record the next undo would revert.
    pub fn peek(&self) -> Option<&Edit> {
        self.records.last()
    }

    /// Returns true if there are records to undo.
    pub fn can_undo(&self) -> bool {
        !self.records.is_empty()
    }

    /// Discards every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Returns the number of undo steps available.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the log holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new()
    }
}

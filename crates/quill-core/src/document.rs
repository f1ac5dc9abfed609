//! Document: the editing session.
//!
//! ## Learning: Composition over Inheritance
//!
//! Rust doesn't have inheritance. Instead, `Document` composes a
//! [`LineStore`], a [`Cursor`] and an [`UndoLog`] and keeps them
//! consistent:
//!
//! 1. an edit mutates the lines and moves the cursor,
//! 2. then reports exactly one [`Change`] to the undo log,
//! 3. which merges it into the top record or pushes a new one.
//!
//! Undo pops a record, applies its [`Inverse`] straight to the lines
//! (without reporting anything back) and restores the cursor.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use quill_buffer::{
    BufferError, Change, Cursor, DEFAULT_TAB_WIDTH, Direction, Inverse, LineStore, Position,
    UndoLog,
};

use crate::command::Command;
use crate::config::Config;
use crate::{CoreError, CoreResult};

/// A line-oriented document with a cursor and undo history.
///
/// ## Thread Safety
///
/// A `Document` is owned by one caller and every operation runs to
/// completion; there is no interior mutability and no locking.
#[derive(Debug, Clone)]
pub struct Document {
    /// The text, one entry per line
    lines: LineStore,

    /// Editing position
    cursor: Cursor,

    /// Undo records
    history: UndoLog,

    /// Spaces a typed tab expands to
    tab_width: usize,

    /// File path (None for untitled documents)
    path: Option<PathBuf>,

    /// Whether the document has unsaved changes
    modified: bool,
}

impl Document {
    /// Creates a new document holding one empty line.
    pub fn new() -> Self {
        Self::with_tab_width(DEFAULT_TAB_WIDTH)
    }

    /// Creates an empty document that expands tabs to `tab_width` spaces.
    pub fn with_tab_width(tab_width: usize) -> Self {
        Self {
            lines: LineStore::new(),
            cursor: Cursor::at_start(),
            history: UndoLog::with_tab_width(tab_width),
            tab_width,
            path: None,
            modified: false,
        }
    }

    /// Creates an empty document using the editor settings of `config`.
    pub fn with_config(config: &Config) -> Self {
        Self::with_tab_width(config.editor.tab_width)
    }

    /// Creates a document from existing lines, cursor at the start.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut doc = Self::new();
        doc.lines = LineStore::from_lines(lines);
        doc
    }

    // ==================== File Operations ====================

    /// Replaces the document with the contents of `path`.
    ///
    /// On failure nothing changes: lines, cursor and undo history are
    /// left exactly as they were. On success the undo history is cleared
    /// and the cursor moves to the start.
    pub fn load(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        let open_error = |source: std::io::Error| CoreError::Open {
            path: path.display().to_string(),
            source,
        };

        let file = File::open(path).map_err(open_error)?;
        let lines = LineStore::read_from(file).map_err(|err| match err {
            BufferError::Io(source) => open_error(source),
            other => CoreError::Buffer(other),
        })?;

        self.lines = lines;
        self.cursor = Cursor::at_start();
        self.history.clear();
        self.path = Some(path.to_path_buf());
        self.modified = false;

        tracing::info!("Loaded {} ({} lines)", path.display(), self.lines.len());
        Ok(())
    }

    /// Writes every line, each followed by `\n`, to `path`.
    ///
    /// The document remembers `path` for later [`Command::Save`]s.
    pub fn save(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        let write_error = |source: std::io::Error| CoreError::Write {
            path: path.display().to_string(),
            source,
        };

        let file = File::create(path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        self.lines.write_to(&mut writer).map_err(|err| match err {
            BufferError::Io(source) => write_error(source),
            other => CoreError::Buffer(other),
        })?;
        writer.flush().map_err(write_error)?;

        self.path = Some(path.to_path_buf());
        self.modified = false;

        tracing::info!("Saved {} ({} lines)", path.display(), self.lines.len());
        Ok(())
    }

    // ==================== Getters ====================

    /// Returns the file path, if the document was loaded or saved.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        self.path
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled")
    }

    /// Returns true if the document has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Returns the current `(row, col)`.
    pub fn cursor_position(&self) -> Position {
        self.cursor.position
    }

    /// Returns the number of lines (always at least 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns a single line.
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.line(row)
    }

    /// Returns the underlying line store.
    pub fn lines(&self) -> &LineStore {
        &self.lines
    }

    /// Returns the tab width.
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Returns true if there is something to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns the number of undo steps available.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Returns up to `count` lines starting at `start`.
    ///
    /// Fewer lines come back when the end of the document is reached.
    /// Negative arguments and a `start` past the line count are rejected
    /// with [`BufferError::RowOutOfRange`].
    pub fn get_lines(&self, start: i64, count: i64) -> CoreResult<Vec<&str>> {
        let out_of_range = || BufferError::RowOutOfRange { start, count };

        let first = usize::try_from(start).map_err(|_| out_of_range())?;
        let count = usize::try_from(count).map_err(|_| out_of_range())?;
        if first > self.lines.len() {
            return Err(out_of_range().into());
        }

        Ok(self.lines.slice(first, count)?)
    }

    // ==================== Cursor Movement ====================

    /// Moves the cursor one step; boundary moves are clamped, never errors.
    pub fn move_cursor(&mut self, direction: Direction) {
        self.cursor.step(direction, &self.lines);
    }

    // ==================== Text Editing ====================

    /// Types a character at the cursor.
    ///
    /// A tab expands to `tab_width` spaces but is recorded as one `'\t'`.
    /// A line break character splits the line instead.
    pub fn insert_char(&mut self, ch: char) -> CoreResult<()> {
        if ch == '\n' || ch == '\r' {
            return self.split_line_at_cursor();
        }

        let Position { row, col } = self.cursor.position;
        let (text, width) = if ch == '\t' {
            (" ".repeat(self.tab_width), self.tab_width)
        } else {
            (ch.to_string(), 1)
        };

        self.lines.insert_str(row, col, &text)?;
        self.cursor.move_to(Position::new(row, col + width));
        self.record(Change::Insert {
            row,
            col: col + width,
            ch,
        });
        Ok(())
    }

    /// Delete key: removes the character under the cursor.
    ///
    /// At the end of a line the next line is joined on; on the last line
    /// this is a no-op.
    pub fn delete_forward(&mut self) -> CoreResult<()> {
        let Position { row, col } = self.cursor.position;

        if col >= self.lines.line_len(row) {
            if row < self.lines.last_row() {
                let join_col = self.lines.join(row)?;
                self.record(Change::Join { row, col: join_col });
            }
            return Ok(());
        }

        let removed = self.lines.remove(row, col, 1)?;
        if let Some(ch) = removed.chars().next() {
            self.record(Change::Delete { row, col, ch });
        }
        Ok(())
    }

    /// Backspace: removes the character before the cursor.
    ///
    /// At column 0 the line is joined onto the previous one and the cursor
    /// lands on the join point; on the first line this is a no-op.
    pub fn delete_backward(&mut self) -> CoreResult<()> {
        let Position { row, col } = self.cursor.position;

        if col == 0 {
            if row > 0 {
                let join_col = self.lines.join(row - 1)?;
                self.cursor.move_to(Position::new(row - 1, join_col));
                self.record(Change::Join {
                    row: row - 1,
                    col: join_col,
                });
            }
            return Ok(());
        }

        let removed = self.lines.remove(row, col - 1, 1)?;
        self.cursor.move_to(Position::new(row, col - 1));
        if let Some(ch) = removed.chars().next() {
            self.record(Change::Delete {
                row,
                col: col - 1,
                ch,
            });
        }
        Ok(())
    }

    /// Enter: splits the line at the cursor and moves to the new line.
    pub fn split_line_at_cursor(&mut self) -> CoreResult<()> {
        let Position { row, col } = self.cursor.position;

        self.lines.split(row, col)?;
        self.cursor.move_to(Position::new(row + 1, 0));
        self.record(Change::Split { row, col });
        Ok(())
    }

    fn record(&mut self, change: Change) {
        tracing::trace!(?change, "edit");
        self.history.submit(change);
        self.modified = true;
    }

    // ==================== Undo ====================

    /// Reverts the most recent undo record.
    ///
    /// With an empty history this returns [`BufferError::NothingToUndo`]
    /// and leaves the document untouched.
    pub fn undo(&mut self) -> CoreResult<()> {
        let Some(inverse) = self.history.undo() else {
            tracing::debug!("Undo requested with empty history");
            return Err(BufferError::NothingToUndo.into());
        };

        tracing::debug!(?inverse, "undo");
        match &inverse {
            Inverse::Remove { row, col, count } => {
                self.lines.remove(*row, *col, *count)?;
            }
            Inverse::Restore { row, col, text } => {
                self.lines.insert_str(*row, *col, text)?;
            }
            Inverse::Join { row, .. } => {
                self.lines.join(*row)?;
            }
            Inverse::Split { row, col } => {
                self.lines.split(*row, *col)?;
            }
        }

        self.cursor.move_to(inverse.cursor());
        self.cursor.clamp(&self.lines);
        self.modified = true;
        Ok(())
    }

    // ==================== Commands ====================

    /// Runs a keymap command.
    ///
    /// `Save` writes back to the document's path and fails with
    /// [`CoreError::NoPath`] for an untitled document.
    pub fn apply(&mut self, command: Command) -> CoreResult<()> {
        tracing::trace!(%command, "apply");
        match command {
            Command::Move(direction) => {
                self.move_cursor(direction);
                Ok(())
            }
            Command::Insert(ch) => self.insert_char(ch),
            Command::DeleteForward => self.delete_forward(),
            Command::DeleteBackward => self.delete_backward(),
            Command::SplitLine => self.split_line_at_cursor(),
            Command::Undo => self.undo(),
            Command::Save => {
                let path = self.path.clone().ok_or(CoreError::NoPath)?;
                self.save(path)
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

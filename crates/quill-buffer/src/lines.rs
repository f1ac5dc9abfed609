//! Line store: the ordered, mutable sequence of lines behind a document.
//!
//! ## Why a `Vec<String>`?
//!
//! Rows are addressed by index, so neighbours are found by arithmetic on
//! the row number instead of by walking a linked list. There is no handle
//! into the sequence that could dangle after an insertion or removal.
//!
//! ## Invariant
//!
//! The store always holds at least one line. Every constructor and every
//! mutation preserves this, so callers never have to special-case an
//! empty document.

use std::io::{Read, Write};

use crate::{BufferError, BufferResult};

/// An ordered sequence of text lines, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStore {
    lines: Vec<String>,
}

impl LineStore {
    /// Creates a store holding a single empty line.
    ///
    /// # Example
    /// ```
    /// use quill_buffer::LineStore;
    ///
    /// let store = LineStore::new();
    /// assert_eq!(store.len(), 1);
    /// ```
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Builds a store from existing lines.
    ///
    /// An empty iterator still yields one empty line.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            Self::new()
        } else {
            Self { lines }
        }
    }

    /// Splits newline-delimited text into lines.
    ///
    /// A trailing `\n` does not start an extra line, and one trailing `\r`
    /// is stripped from each line.
    pub fn parse(text: &str) -> Self {
        Self::from_lines(
            text.split_terminator('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line)),
        )
    }

    /// Reads the whole source before building the store.
    ///
    /// Nothing is returned unless the read succeeds, so a failed read
    /// never leaves a half-populated store behind.
    pub fn read_from(mut reader: impl Read) -> BufferResult<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::parse(&text))
    }

    /// Writes every line followed by `\n`.
    pub fn write_to(&self, mut writer: impl Write) -> BufferResult<()> {
        for line in &self.lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    // ==================== Access ====================

    /// Returns the number of lines (always at least 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// A store is never empty; provided for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the index of the last row.
    #[inline]
    pub fn last_row(&self) -> usize {
        self.lines.len() - 1
    }

    /// Returns a line by row.
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    /// Returns the length of a line in characters, or 0 for a missing row.
    pub fn line_len(&self, row: usize) -> usize {
        self.line(row).map_or(0, |line| line.chars().count())
    }

    /// Returns the character at a position, if any.
    pub fn char_at(&self, row: usize, col: usize) -> Option<char> {
        self.line(row)?.chars().nth(col)
    }

    /// Iterates over all lines in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Returns up to `count` lines starting at `start`.
    ///
    /// `start == len()` yields an empty list; anything past that is an error.
    pub fn slice(&self, start: usize, count: usize) -> BufferResult<Vec<&str>> {
        if start > self.lines.len() {
            return Err(BufferError::RowOutOfBounds {
                row: start,
                len: self.lines.len(),
            });
        }
        Ok(self.lines[start..]
            .iter()
            .take(count)
            .map(String::as_str)
            .collect())
    }

    // ==================== Mutations ====================

    /// Inserts text at a character column.
    pub fn insert_str(&mut self, row: usize, col: usize, text: &str) -> BufferResult<()> {
        let line = self.line_mut(row)?;
        let idx = byte_index(line, col).ok_or(BufferError::PositionOutOfBounds { row, col })?;
        line.insert_str(idx, text);
        Ok(())
    }

    /// Removes `count` characters starting at `col` and returns them.
    pub fn remove(&mut self, row: usize, col: usize, count: usize) -> BufferResult<String> {
        let line = self.line_mut(row)?;
        let out_of_bounds = BufferError::PositionOutOfBounds {
            row,
            col: col + count,
        };
        let start = byte_index(line, col).ok_or(BufferError::PositionOutOfBounds { row, col })?;
        let end = byte_index(line, col + count).ok_or(out_of_bounds)?;
        Ok(line.drain(start..end).collect())
    }

    /// Splits a line in two at `col`; the tail becomes row `row + 1`.
    pub fn split(&mut self, row: usize, col: usize) -> BufferResult<()> {
        let line = self.line_mut(row)?;
        let idx = byte_index(line, col).ok_or(BufferError::PositionOutOfBounds { row, col })?;
        let tail = line.split_off(idx);
        self.lines.insert(row + 1, tail);
        Ok(())
    }

    /// Appends row `row + 1` onto row `row`.
    ///
    /// Returns the join column, i.e. the former length of `row`.
    pub fn join(&mut self, row: usize) -> BufferResult<usize> {
        if row + 1 >= self.lines.len() {
            return Err(BufferError::RowOutOfBounds {
                row: row + 1,
                len: self.lines.len(),
            });
        }
        let next = self.lines.remove(row + 1);
        let line = &mut self.lines[row];
        let col = line.chars().count();
        line.push_str(&next);
        Ok(col)
    }

    fn line_mut(&mut self, row: usize) -> BufferResult<&mut String> {
        let len = self.lines.len();
        self.lines
            .get_mut(row)
            .ok_or(BufferError::RowOutOfBounds { row, len })
    }
}

impl Default for LineStore {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for LineStore {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

/// Converts a character column into a byte index, allowing the end of line.
fn byte_index(line: &str, col: usize) -> Option<usize> {
    line.char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(line.len()))
        .nth(col)
}

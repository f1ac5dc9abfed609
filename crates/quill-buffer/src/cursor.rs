//! Cursor and position types for text navigation.
//!
//! ## Learning: Newtype Pattern
//!
//! `Position` is a struct that wraps row/column coordinates.
//! This is better than using `(usize, usize)` because:
//! - Type safety: Can't accidentally swap row and column
//! - Named fields: Self-documenting code
//! - Methods: Can add behavior specific to positions

use serde::{Deserialize, Serialize};

use crate::LineStore;

/// A position in the document (row and column).
///
/// Both row and column are 0-indexed; the column counts characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Row number (0-indexed)
    pub row: usize,
    /// Column number (0-indexed, in characters not bytes)
    pub col: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position at the start of the document.
    pub const ZERO: Position = Position { row: 0, col: 0 };
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display as 1-indexed for user-facing output
        write!(f, "{}:{}", self.row + 1, self.col + 1)
    }
}

/// A cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

/// The editing position inside a [`LineStore`].
///
/// Between operations the cursor always satisfies
/// `row < lines.len()` and `col <= lines.line_len(row)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Current cursor position
    pub position: Position,
}

impl Cursor {
    /// Creates a new cursor at a position.
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Creates a cursor at row 0, column 0.
    pub fn at_start() -> Self {
        Self::new(Position::ZERO)
    }

    /// Moves the cursor to a new position.
    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    /// Moves one step in `direction`.
    ///
    /// Never fails: moves past the first or last row or column are
    /// clamped, and Left/Right wrap across line boundaries.
    pub fn step(&mut self, direction: Direction, lines: &LineStore) {
        let Position { row, col } = self.position;
        let line_len = lines.line_len(row);

        self.position = match direction {
            Direction::Up if row > 0 => Position::new(row - 1, col.min(lines.line_len(row - 1))),
            Direction::Down if row < lines.last_row() => {
                Position::new(row + 1, col.min(lines.line_len(row + 1)))
            }
            Direction::Left if col > 0 => Position::new(row, col - 1),
            Direction::Left if row > 0 => Position::new(row - 1, lines.line_len(row - 1)),
            Direction::Right if col < line_len => Position::new(row, col + 1),
            Direction::Right if row < lines.last_row() => Position::new(row + 1, 0),
            Direction::Home => Position::new(row, 0),
            Direction::End => Position::new(row, line_len),
            _ => self.position,
        };
    }

    /// Pulls the cursor back inside the store after the lines changed.
    pub fn clamp(&mut self, lines: &LineStore) {
        let row = self.position.row.min(lines.last_row());
        let col = self.position.col.min(lines.line_len(row));
        self.position = Position::new(row, col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor_at(row: usize, col: usize) -> Cursor {
        Cursor::new(Position::new(row, col))
    }

    #[test]
    fn test_position_ordering() {
        let p1 = Position::new(1, 5);
        let p2 = Position::new(2, 3);
        let p3 = Position::new(1, 10);

        assert!(p1 < p2);
        assert!(p1 < p3);
        assert!(p2 > p3);
        assert_eq!(p1.to_string(), "2:6");
    }

    #[test]
    fn test_vertical_moves_clamp_column() {
        let lines = LineStore::from_lines(["long line", "ab", "longer line"]);
        let mut cursor = cursor_at(0, 8);

        cursor.step(Direction::Down, &lines);
        assert_eq!(cursor.position, Position::new(1, 2));

        // The column was clamped, so it stays at 2 on the longer line.
        cursor.step(Direction::Down, &lines);
        assert_eq!(cursor.position, Position::new(2, 2));

        cursor.step(Direction::Down, &lines);
        assert_eq!(cursor.position, Position::new(2, 2));
    }

    #[test]
    fn test_up_on_first_row_is_noop() {
        let lines = LineStore::from_lines(["abc", "def"]);
        let mut cursor = cursor_at(0, 2);
        cursor.step(Direction::Up, &lines);
        assert_eq!(cursor.position, Position::new(0, 2));
    }

    #[test]
    fn test_left_wraps_to_previous_line_end() {
        let lines = LineStore::from_lines(["abc", "de"]);
        let mut cursor = cursor_at(1, 0);
        cursor.step(Direction::Left, &lines);
        assert_eq!(cursor.position, Position::new(0, 3));

        let mut cursor = cursor_at(0, 0);
        cursor.step(Direction::Left, &lines);
        assert_eq!(cursor.position, Position::ZERO);
    }

    #[test]
    fn test_right_wraps_to_next_line_start() {
        let lines = LineStore::from_lines(["abc", "de"]);
        let mut cursor = cursor_at(0, 3);
        cursor.step(Direction::Right, &lines);
        assert_eq!(cursor.position, Position::new(1, 0));

        let mut cursor = cursor_at(1, 2);
        cursor.step(Direction::Right, &lines);
        assert_eq!(cursor.position, Position::new(1, 2));
    }

    #[test]
    fn test_home_and_end() {
        let lines = LineStore::from_lines(["hello"]);
        let mut cursor = cursor_at(0, 2);
        cursor.step(Direction::End, &lines);
        assert_eq!(cursor.position, Position::new(0, 5));
        cursor.step(Direction::Home, &lines);
        assert_eq!(cursor.position, Position::ZERO);
    }

    #[test]
    fn test_clamp_after_lines_shrink() {
        let lines = LineStore::from_lines(["ab"]);
        let mut cursor = cursor_at(4, 9);
        cursor.clamp(&lines);
        assert_eq!(cursor.position, Position::new(0, 2));
    }
}

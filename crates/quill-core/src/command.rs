//! Commands a host can send to a [`Document`](crate::Document).
//!
//! ## Learning: The Command Pattern
//!
//! Commands encapsulate actions as values:
//! - Key bindings map to commands instead of to function calls
//! - Scripts are just lists of commands
//! - The document dispatches them in one place (`Document::apply`)

use quill_buffer::Direction;

/// Built-in editing commands.
///
/// The set is closed, so every `match` on it is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move the cursor one step
    Move(Direction),
    /// Type a character (a tab expands to spaces)
    Insert(char),
    /// Delete key
    DeleteForward,
    /// Backspace key
    DeleteBackward,
    /// Enter key
    SplitLine,
    /// Revert the most recent undo record
    Undo,
    /// Write the document back to its path
    Save,
}

impl Command {
    /// Returns the command's display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Command::Move(Direction::Up) => "Move Up",
            Command::Move(Direction::Down) => "Move Down",
            Command::Move(Direction::Left) => "Move Left",
            Command::Move(Direction::Right) => "Move Right",
            Command::Move(Direction::Home) => "Move to Line Start",
            Command::Move(Direction::End) => "Move to Line End",
            Command::Insert(_) => "Insert",
            Command::DeleteForward => "Delete",
            Command::DeleteBackward => "Backspace",
            Command::SplitLine => "New Line",
            Command::Undo => "Undo",
            Command::Save => "Save",
        }
    }

    /// Parses a command id as used in `[keyboard.bindings]`.
    ///
    /// Ids look like `editor.undo` or `cursor.left`.
    pub fn parse(id: &str) -> Option<Self> {
        let command = match id {
            "cursor.up" => Command::Move(Direction::Up),
            "cursor.down" => Command::Move(Direction::Down),
            "cursor.left" => Command::Move(Direction::Left),
            "cursor.right" => Command::Move(Direction::Right),
            "cursor.home" => Command::Move(Direction::Home),
            "cursor.end" => Command::Move(Direction::End),
            "editor.delete" => Command::DeleteForward,
            "editor.backspace" => Command::DeleteBackward,
            "editor.newline" => Command::SplitLine,
            "editor.tab" => Command::Insert('\t'),
            "editor.undo" => Command::Undo,
            "editor.save" => Command::Save,
            _ => return None,
        };
        Some(command)
    }

    /// Returns true if running the command may change the text.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Command::Insert(_)
                | Command::DeleteForward
                | Command::DeleteBackward
                | Command::SplitLine
                | Command::Undo
        )
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Insert(ch) => write!(f, "{} {:?}", self.display_name(), ch),
            _ => write!(f, "{}", self.display_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_ids() {
        assert_eq!(Command::parse("editor.undo"), Some(Command::Undo));
        assert_eq!(
            Command::parse("cursor.home"),
            Some(Command::Move(Direction::Home))
        );
        assert_eq!(Command::parse("editor.tab"), Some(Command::Insert('\t')));
        assert_eq!(Command::parse("editor.redo"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Command::SplitLine.to_string(), "New Line");
        assert_eq!(Command::Insert('x').to_string(), "Insert 'x'");
    }

    #[test]
    fn test_is_edit() {
        assert!(Command::Insert('a').is_edit());
        assert!(Command::Undo.is_edit());
        assert!(!Command::Move(Direction::Left).is_edit());
        assert!(!Command::Save.is_edit());
    }
}

//! Keyboard mapping and key scripts.
//!
//! A [`Keymap`] turns a [`KeyPress`] into a [`Command`]. Special keys are
//! looked up in a table of bindings; plain characters that are not bound
//! fall through to [`Command::Insert`].
//!
//! Key scripts are a compact text form of a key sequence used by the
//! command-line host: literal characters are typed as-is and `<name>`
//! tokens name a key, e.g. `ab<left><bs><ctrl+z>`. `<lt>` types a `<`.

use std::collections::HashMap;

use quill_buffer::Direction;

use crate::command::Command;
use crate::config::Config;
use crate::{CoreError, CoreResult};

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers pressed.
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
    };

    /// Ctrl modifier.
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: false,
    };

    /// Returns true if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift
    }

    /// Returns true if the modifiers turn a character into a shortcut.
    pub fn is_command(&self) -> bool {
        self.ctrl || self.alt
    }

    /// Parses modifiers from a string like "ctrl+shift".
    pub fn parse(s: &str) -> Self {
        let mut mods = Modifiers::NONE;
        for part in s.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => mods.ctrl = true,
                "alt" | "option" => mods.alt = true,
                "shift" => mods.shift = true,
                _ => {}
            }
        }
        mods
    }
}

impl std::fmt::Display for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

impl Key {
    /// Parses a key from a string.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "enter" | "return" | "cr" => Some(Key::Enter),
            "tab" => Some(Key::Tab),
            "backspace" | "bs" => Some(Key::Backspace),
            "delete" | "del" => Some(Key::Delete),
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "home" => Some(Key::Home),
            "end" => Some(Key::End),
            "space" => Some(Key::Char(' ')),
            "lt" => Some(Key::Char('<')),
            "gt" => Some(Key::Char('>')),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(Key::Char(ch)),
                    _ => None,
                }
            }
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(' ') => write!(f, "Space"),
            Key::Char(c) => write!(f, "{}", c.to_uppercase()),
            Key::Enter => write!(f, "Enter"),
            Key::Tab => write!(f, "Tab"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Delete => write!(f, "Delete"),
            Key::Up => write!(f, "Up"),
            Key::Down => write!(f, "Down"),
            Key::Left => write!(f, "Left"),
            Key::Right => write!(f, "Right"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
        }
    }
}

/// A key press event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// Creates a new key press.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key press with no modifiers.
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Parses a key binding string like "ctrl+s" or "home".
    pub fn parse(s: &str) -> Option<Self> {
        let (mod_str, key_str) = match s.rsplit_once('+') {
            // "ctrl++" binds the plus key
            Some((mods, "")) => (mods.strip_suffix('+')?, "+"),
            Some((mods, key)) => (mods, key),
            None => ("", s),
        };
        let mut key = Key::parse(key_str.trim())?;
        let modifiers = Modifiers::parse(mod_str);

        // Shortcuts are case-insensitive: ctrl+Z is ctrl+z
        if modifiers.is_command() {
            if let Key::Char(ch) = key {
                key = Key::Char(ch.to_ascii_lowercase());
            }
        }

        Some(Self { key, modifiers })
    }
}

impl std::fmt::Display for KeyPress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}

/// Keyboard mapping.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyPress, Command>,
}

impl Keymap {
    /// Creates a new keymap with default bindings.
    pub fn new() -> Self {
        let mut keymap = Self {
            bindings: HashMap::new(),
        };
        keymap.add_default_bindings();
        keymap
    }

    /// Creates a keymap from configuration.
    ///
    /// User bindings override the defaults. Entries with an unknown key or
    /// command id are skipped with a warning.
    pub fn from_config(config: &Config) -> Self {
        let mut keymap = Self::new();

        for (key_str, cmd_str) in &config.keyboard.bindings {
            match (KeyPress::parse(key_str), Command::parse(cmd_str)) {
                (Some(key), Some(command)) => keymap.bind(key, command),
                (None, _) => tracing::warn!("Unknown key in binding: {:?}", key_str),
                (_, None) => tracing::warn!("Unknown command in binding: {:?}", cmd_str),
            }
        }

        keymap
    }

    /// Adds default key bindings.
    fn add_default_bindings(&mut self) {
        let defaults = [
            (Key::Enter, Command::SplitLine),
            (Key::Tab, Command::Insert('\t')),
            (Key::Backspace, Command::DeleteBackward),
            (Key::Delete, Command::DeleteForward),
            (Key::Up, Command::Move(Direction::Up)),
            (Key::Down, Command::Move(Direction::Down)),
            (Key::Left, Command::Move(Direction::Left)),
            (Key::Right, Command::Move(Direction::Right)),
            (Key::Home, Command::Move(Direction::Home)),
            (Key::End, Command::Move(Direction::End)),
        ];
        for (key, command) in defaults {
            self.bind(KeyPress::plain(key), command);
        }

        self.bind(KeyPress::new(Key::Char('z'), Modifiers::CTRL), Command::Undo);
        self.bind(KeyPress::new(Key::Char('s'), Modifiers::CTRL), Command::Save);
    }

    /// Binds a key press to a command, replacing any existing binding.
    pub fn bind(&mut self, key: KeyPress, command: Command) {
        self.bindings.insert(key, command);
    }

    /// Resolves a key press to a command.
    ///
    /// Unbound characters without Ctrl/Alt are typed.
    pub fn resolve(&self, key: &KeyPress) -> Option<Command> {
        if let Some(command) = self.bindings.get(key) {
            return Some(*command);
        }
        match key.key {
            Key::Char(ch) if !key.modifiers.is_command() => Some(Command::Insert(ch)),
            _ => None,
        }
    }

    /// Returns the number of explicit bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if there are no explicit bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a key script into key presses.
///
/// A literal newline becomes Enter, a literal tab becomes Tab, and a
/// carriage return is ignored.
pub fn parse_key_script(script: &str) -> CoreResult<Vec<KeyPress>> {
    let mut keys = Vec::new();
    let mut chars = script.chars();

    while let Some(ch) = chars.next() {
        let key = match ch {
            '<' => {
                let mut token = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '>' {
                        closed = true;
                        break;
                    }
                    token.push(c);
                }
                if !closed {
                    return Err(CoreError::KeyScript(format!("unterminated <{}", token)));
                }
                KeyPress::parse(&token)
                    .ok_or_else(|| CoreError::KeyScript(format!("unknown key <{}>", token)))?
            }
            '\n' => KeyPress::plain(Key::Enter),
            '\t' => KeyPress::plain(Key::Tab),
            '\r' => continue,
            _ => KeyPress::plain(Key::Char(ch)),
        };
        keys.push(key);
    }

    Ok(keys)
}

//! # Quill Core
//!
//! Document orchestration on top of `quill-buffer`.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  Document                     │
//! │  ┌───────────┐ ┌──────────┐ ┌──────────────┐ │
//! │  │ LineStore │ │  Cursor  │ │   UndoLog    │ │
//! │  └───────────┘ └──────────┘ └──────────────┘ │
//! └──────────────────────────────────────────────┘
//!        ▲
//!        │ Command
//! ┌──────┴──────┐   ┌────────┐
//! │   Keymap    │◄──│ Config │
//! └─────────────┘   └────────┘
//! ```
//!
//! Every edit mutates the line store and the cursor, then reports one
//! raw change to the undo log. Undo applies the inverse directly and is
//! never recorded itself.

pub mod command;
pub mod config;
pub mod document;
pub mod keymap;

pub use command::Command;
pub use config::Config;
pub use document::Document;
pub use keymap::{Key, KeyPress, Keymap, Modifiers, parse_key_script};

pub use quill_buffer::{BufferError, Direction, Position};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Document has no file path")]
    NoPath,

    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid key script: {0}")]
    KeyScript(String),
}

//! # Quill - a line editing core
//!
//! Command-line host for a Quill document: load a file, replay a key
//! script against it, print a window of lines and optionally save.
//!
//! ## Quick Start
//!
//! ```bash
//! # Show the first 24 lines of a file
//! cargo run -- notes.txt
//!
//! # Type, move and undo, then write the result elsewhere
//! cargo run -- notes.txt --keys 'hello<enter>world<ctrl+z>' --output out.txt
//!
//! # Machine-readable view
//! cargo run -- notes.txt --start 10 --rows 5 --json
//! ```

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill_core::{BufferError, Config, CoreError, Document, Keymap, Position, parse_key_script};

/// Quill - replay edits against a text file
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Key script to replay, e.g. 'abc<left><bs><ctrl+z>'
    #[arg(short, long, value_name = "SCRIPT")]
    keys: Option<String>,

    /// Write the document here after replaying the keys
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// First row to print
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    start: i64,

    /// Number of rows to print
    #[arg(long, default_value_t = 24, allow_negative_numbers = true)]
    rows: i64,

    /// Print the view as JSON
    #[arg(long)]
    json: bool,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// What the host shows after replaying the script.
#[derive(Debug, Serialize)]
struct View {
    name: String,
    modified: bool,
    cursor: Position,
    start: i64,
    lines: Vec<String>,
}

impl View {
    fn render(&self) -> String {
        let first = usize::try_from(self.start).unwrap_or(0);
        let mut out = String::new();
        for (offset, line) in self.lines.iter().enumerate() {
            out.push_str(&format!("{:>4} | {}\n", first + offset + 1, line));
        }
        out.push_str(&format!(
            "-- {}{} at {}\n",
            self.name,
            if self.modified { " [+]" } else { "" },
            self.cursor
        ));
        out
    }
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Quill v{}", env!("CARGO_PKG_VERSION"));

    let view = run(&args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", view.render());
    }

    Ok(())
}

fn run(args: &Args) -> anyhow::Result<View> {
    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load(),
    };
    let keymap = Keymap::from_config(&config);

    let mut doc = Document::with_config(&config);
    if let Some(file) = &args.file {
        doc.load(file)?;
    }

    if let Some(script) = &args.keys {
        for key in parse_key_script(script)? {
            let Some(command) = keymap.resolve(&key) else {
                tracing::warn!("No binding for {}", key);
                continue;
            };
            match doc.apply(command) {
                Ok(()) => {}
                Err(CoreError::Buffer(BufferError::NothingToUndo)) => {
                    tracing::warn!("Nothing to undo");
                }
                Err(err) => return Err(err).with_context(|| format!("{} failed", command)),
            }
        }
    }

    if let Some(output) = &args.output {
        doc.save(output)?;
    }

    let lines = doc
        .get_lines(args.start, args.rows)?
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(View {
        name: doc.name().to_string(),
        modified: doc.is_modified(),
        cursor: doc.cursor_position(),
        start: args.start,
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["quill"]);
        assert!(args.file.is_none());
        assert_eq!(args.start, 0);
        assert_eq!(args.rows, 24);
        assert!(!args.json);
    }

    #[test]
    fn test_args_with_file_and_keys() {
        let args = Args::parse_from(["quill", "test.txt", "--keys", "ab<bs>", "--start", "-1"]);
        assert_eq!(args.file, Some(PathBuf::from("test.txt")));
        assert_eq!(args.keys.as_deref(), Some("ab<bs>"));
        assert_eq!(args.start, -1);
    }

    #[test]
    fn test_run_replays_script_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        let config = dir.path().join("config.toml");
        std::fs::write(&input, "hello\r\nworld\r\n").unwrap();
        std::fs::write(&config, "").unwrap();

        let args = Args::parse_from([
            "quill",
            input.to_str().unwrap(),
            "--keys",
            "<end>!!<enter>x<ctrl+z>",
            "--output",
            output.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ]);
        let view = run(&args).unwrap();

        assert_eq!(view.lines, vec!["hello!!", "", "world"]);
        assert_eq!(view.cursor, Position::new(1, 0));
        assert!(!view.modified);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "hello!!\n\nworld\n");
    }

    #[test]
    fn test_run_rejects_negative_start() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "").unwrap();

        let args = Args::parse_from([
            "quill",
            "--start",
            "-1",
            "--config",
            config.to_str().unwrap(),
        ]);
        assert!(run(&args).is_err());
    }

    #[test]
    fn test_render() {
        let view = View {
            name: "notes.txt".to_string(),
            modified: true,
            cursor: Position::new(0, 2),
            start: 0,
            lines: vec!["ab".to_string()],
        };
        assert_eq!(view.render(), "   1 | ab\n-- notes.txt [+] at 1:3\n");
    }
}

//! playscript CLI - Command-line interface library
//!
//! This library provides the CLI functionality for playscript:
//! - Parse: Convert a script into a listing or JSON document
//! - Characters: Report who speaks and sings, and how often
//!
//! # Library Usage
//!
//! ```ignore
//! use playscript_cli::{parse_command, Settings};
//!
//! let settings = Settings::discover(&input, None)?;
//! parse_command(&input, Some(&output), &settings)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Print the listing of a script
//! playscript parse frozen.txt
//!
//! # Write the document as JSON
//! playscript parse frozen.txt --format json --output frozen.json
//!
//! # Character report with debug logging
//! RUST_LOG=debug playscript characters frozen.txt
//! ```

pub mod app;
pub mod settings;

// Re-export main entry point and types
pub use app::{
    characters_command, load_document, parse_command, render_characters, render_document,
    summarize_characters, CharacterSummary,
};
pub use app::run_cli;
pub use settings::{LoggingSettings, OutputFormat, OutputSettings, Settings, CONFIG_FILE_NAME};

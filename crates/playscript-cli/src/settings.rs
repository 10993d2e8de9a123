//! Configuration settings
//!
//! Mirrors `playscript.toml`. Every field is optional; a missing file or
//! section falls back to the defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use playscript_core::ListingConfig;
use serde::{Deserialize, Serialize};

/// File name looked up next to the input script
pub const CONFIG_FILE_NAME: &str = "playscript.toml";

/// Output format for parsed documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable listing, one entry per line
    #[default]
    Text,
    /// JSON serialization of the document
    Json,
}

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Output settings
    pub output: OutputSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read settings from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Resolve settings for a command
    ///
    /// An explicit path must exist. Otherwise `playscript.toml` beside the
    /// input is used when present, falling back to defaults.
    pub fn discover(input: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            return Self::load(path);
        }

        match sibling_config(input) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Listing options derived from the output section
    pub fn listing_config(&self) -> ListingConfig {
        ListingConfig {
            mark_songs: self.output.mark_songs,
            mark_continuations: self.output.mark_continuations,
        }
    }
}

fn sibling_config(input: &Path) -> Option<PathBuf> {
    let dir = match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let candidate = dir.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Default output format
    pub format: OutputFormat,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Prefix song lines in the listing
    pub mark_songs: bool,
    /// Mark continued utterances in the listing
    pub mark_continuations: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            pretty: true,
            mark_songs: false,
            mark_continuations: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

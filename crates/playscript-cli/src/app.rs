//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use playscript_ast::{ScriptDocument, UtteranceKind};
use playscript_core::{generate_with_config, parse_reader};

use crate::settings::{OutputFormat, Settings};

#[derive(Parser)]
#[command(name = "playscript")]
#[command(author, version, about = "Fixed-column play scripts to structured documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a script and print its entries
    Parse {
        /// Input script file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the characters of a script with their line counts
    Characters {
        /// Input script file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            input,
            format,
            output,
            config,
        } => {
            let settings = command_settings(&input, config.as_deref(), format)?;
            parse_command(&input, output.as_deref(), &settings)?;
        }
        Commands::Characters {
            input,
            format,
            config,
        } => {
            let settings = command_settings(&input, config.as_deref(), format)?;
            characters_command(&input, &settings)?;
        }
    }

    Ok(())
}

/// Load settings, apply flag overrides and install logging
fn command_settings(
    input: &Path,
    config: Option<&Path>,
    format: Option<OutputFormat>,
) -> Result<Settings> {
    let mut settings = Settings::discover(input, config)?;
    if let Some(format) = format {
        settings.output.format = format;
    }
    init_logging(&settings);
    Ok(settings)
}

/// Install the stderr subscriber; `RUST_LOG` wins over the configured level
fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read and parse a script file
pub fn load_document(input: &Path) -> Result<ScriptDocument> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let file = File::open(input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;
    let doc = parse_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse script: {}", input.display()))?;

    debug!(file = %input.display(), entries = doc.len(), "Loaded script");
    Ok(doc)
}

/// Render a document in the configured format
pub fn render_document(doc: &ScriptDocument, settings: &Settings) -> Result<String> {
    match settings.output.format {
        OutputFormat::Text => Ok(generate_with_config(doc, settings.listing_config())),
        OutputFormat::Json => to_json(doc, settings.output.pretty)
            .context("Failed to serialize document to JSON"),
    }
}

/// Execute the parse command
pub fn parse_command(input: &Path, output: Option<&Path>, settings: &Settings) -> Result<()> {
    let doc = load_document(input)?;
    let rendered = render_document(&doc, settings)?;

    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", rendered))
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!(file = %path.display(), "Wrote output");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// One row of the characters report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterSummary {
    pub name: String,
    pub dialogue: usize,
    pub songs: usize,
}

/// Characters in first-appearance order with their utterance counts
pub fn summarize_characters(doc: &ScriptDocument) -> Vec<CharacterSummary> {
    doc.characters()
        .iter()
        .map(|(id, character)| CharacterSummary {
            name: character.name.clone(),
            dialogue: doc.count_of(id, UtteranceKind::Dialogue),
            songs: doc.count_of(id, UtteranceKind::Song),
        })
        .collect()
}

/// Render the characters report in the configured format
pub fn render_characters(doc: &ScriptDocument, settings: &Settings) -> Result<String> {
    let summaries = summarize_characters(doc);

    match settings.output.format {
        OutputFormat::Json => to_json(&summaries, settings.output.pretty)
            .context("Failed to serialize characters to JSON"),
        OutputFormat::Text => {
            if summaries.is_empty() {
                return Ok("No characters found.".to_string());
            }
            let lines: Vec<String> = summaries
                .iter()
                .map(|s| format!("{}: {} dialogue, {} song", s.name, s.dialogue, s.songs))
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

/// Execute the characters command
pub fn characters_command(input: &Path, settings: &Settings) -> Result<()> {
    let doc = load_document(input)?;
    println!("{}", render_characters(&doc, settings)?);
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playscript_ast::Utterance;

    fn sample() -> ScriptDocument {
        let mut doc = ScriptDocument::new();
        let anna = doc.characters_mut().resolve_or_create("ANNA");
        let elsa = doc.characters_mut().resolve_or_create("ELSA");
        for (id, kind) in [
            (anna, UtteranceKind::Dialogue),
            (elsa, UtteranceKind::Song),
            (anna, UtteranceKind::Song),
            (anna, UtteranceKind::Dialogue),
        ] {
            let mut u = Utterance::spoken(kind, false, id);
            u.push_line("La.");
            doc.append(u);
        }
        doc
    }

    #[test]
    fn test_summarize_characters_counts() {
        let summaries = summarize_characters(&sample());
        assert_eq!(
            summaries,
            vec![
                CharacterSummary {
                    name: "ANNA".to_string(),
                    dialogue: 2,
                    songs: 1,
                },
                CharacterSummary {
                    name: "ELSA".to_string(),
                    dialogue: 0,
                    songs: 1,
                },
            ]
        );
    }

    #[test]
    fn test_render_characters_text() {
        let text = render_characters(&sample(), &Settings::default()).unwrap();
        assert_eq!(text, "ANNA: 2 dialogue, 1 song\nELSA: 0 dialogue, 1 song");

        let empty = render_characters(&ScriptDocument::new(), &Settings::default()).unwrap();
        assert_eq!(empty, "No characters found.");
    }

    #[test]
    fn test_render_characters_json() {
        let mut settings = Settings::default();
        settings.output.format = OutputFormat::Json;
        settings.output.pretty = false;

        let json = render_characters(&sample(), &settings).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"ANNA","dialogue":2,"songs":1},{"name":"ELSA","dialogue":0,"songs":1}]"#
        );
    }

    #[test]
    fn test_load_document_missing_file() {
        let err = load_document(Path::new("/nonexistent/script.txt")).unwrap_err();
        assert!(err.to_string().contains("Input file not found"));
    }
}

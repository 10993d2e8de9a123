//! Plain-text listing
//!
//! This module renders a `playscript_ast::ScriptDocument` as one line
//! per entry, the quickest way to eyeball what the parser made of a
//! script.
//!
//! # Example
//!
//! ```
//! use playscript_ast::{SceneHeading, ScriptDocument, Utterance};
//! use playscript_core::generate;
//!
//! let mut doc = ScriptDocument::new();
//! doc.append(SceneHeading::new("NIGHT", "KITCHEN"));
//! doc.append(Utterance::narration("The kettle whistles."));
//!
//! let listing = generate(&doc);
//! assert_eq!(listing, "TIME : NIGHT, PLACE : KITCHEN\nNARR : The kettle whistles.");
//! ```

use std::fmt::Write;

use playscript_ast::{Entry, SceneHeading, ScriptDocument, Utterance, UtteranceKind};

/// Listing generator configuration
#[derive(Debug, Clone, Default)]
pub struct ListingConfig {
    /// Prefix song lines with a note sign
    pub mark_songs: bool,
    /// Add `(CONT'D)` after the speaker of continued utterances
    pub mark_continuations: bool,
}

/// Plain-text listing generator
pub struct ListingGenerator {
    config: ListingConfig,
    output: String,
}

impl ListingGenerator {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self {
            config: ListingConfig::default(),
            output: String::new(),
        }
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: ListingConfig) -> Self {
        Self {
            config,
            output: String::new(),
        }
    }

    /// Render a document, one entry per line
    pub fn generate(&mut self, doc: &ScriptDocument) -> String {
        self.output.clear();

        for entry in doc.entries() {
            match entry {
                Entry::SceneHeading(heading) => self.generate_heading(heading),
                Entry::Utterance(utterance) => self.generate_utterance(doc, utterance),
            }
        }

        self.output.trim_end().to_string()
    }

    fn generate_heading(&mut self, heading: &SceneHeading) {
        writeln!(
            self.output,
            "TIME : {}, PLACE : {}",
            heading.time, heading.place
        )
        .unwrap();
    }

    fn generate_utterance(&mut self, doc: &ScriptDocument, utterance: &Utterance) {
        if utterance.kind == UtteranceKind::Narration {
            writeln!(self.output, "NARR : {}", utterance.text).unwrap();
            return;
        }

        if self.config.mark_songs && utterance.kind == UtteranceKind::Song {
            self.output.push_str("♪ ");
        }
        let name = doc
            .speaker_of(utterance)
            .map(|c| c.name.as_str())
            .unwrap_or("?");
        self.output.push_str(name);
        if self.config.mark_continuations && utterance.continued {
            self.output.push_str(" (CONT'D)");
        }
        writeln!(self.output, " : {}", utterance.text).unwrap();
    }
}

impl Default for ListingGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a document with the default configuration
pub fn generate(doc: &ScriptDocument) -> String {
    ListingGenerator::new().generate(doc)
}

/// Render a document with a custom configuration
pub fn generate_with_config(doc: &ScriptDocument, config: ListingConfig) -> String {
    ListingGenerator::with_config(config).generate(doc)
}

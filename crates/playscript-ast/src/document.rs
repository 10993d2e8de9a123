//! Script document root
//!
//! A `ScriptDocument` holds the ordered entries of a parsed script
//! together with the registry of characters that speak in it.

use serde::{Deserialize, Serialize};

use crate::character::{Character, CharacterId};
use crate::content::{Entry, SceneHeading, Utterance, UtteranceKind};
use crate::registry::CharacterRegistry;

/// A complete parsed script
///
/// Entries are append-only: once appended, an entry can be read but
/// not modified.
///
/// Only utterances and scene headings can be appended:
///
/// ```compile_fail
/// use playscript_ast::{Character, ScriptDocument};
///
/// let mut doc = ScriptDocument::new();
/// doc.append(Character::new("ANNA"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScriptDocument {
    entries: Vec<Entry>,
    characters: CharacterRegistry,
}

impl ScriptDocument {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an utterance or scene heading at the end of the document
    pub fn append(&mut self, entry: impl Into<Entry>) {
        self.entries.push(entry.into());
    }

    /// Entries in document order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Iterate over all utterances in document order
    pub fn utterances(&self) -> impl Iterator<Item = &Utterance> {
        self.entries.iter().filter_map(Entry::as_utterance)
    }

    /// Iterate over all scene headings in document order
    pub fn scene_headings(&self) -> impl Iterator<Item = &SceneHeading> {
        self.entries.iter().filter_map(Entry::as_scene_heading)
    }

    pub fn characters(&self) -> &CharacterRegistry {
        &self.characters
    }

    pub fn characters_mut(&mut self) -> &mut CharacterRegistry {
        &mut self.characters
    }

    /// Resolve an utterance's speaker to its character record
    pub fn speaker_of(&self, utterance: &Utterance) -> Option<&Character> {
        utterance.speaker.and_then(|id| self.characters.get(id))
    }

    /// Dialogue and song texts spoken by one character, in document order
    pub fn speech_of(&self, id: CharacterId) -> impl Iterator<Item = &str> {
        self.utterances()
            .filter(move |u| u.kind.is_speech() && u.speaker == Some(id))
            .map(|u| u.text.as_str())
    }

    /// Number of utterances of a given kind spoken by one character
    pub fn count_of(&self, id: CharacterId, kind: UtteranceKind) -> usize {
        self.utterances()
            .filter(|u| u.kind == kind && u.speaker == Some(id))
            .count()
    }

    /// Check if the document has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

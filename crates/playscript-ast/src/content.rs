//! Document entries
//!
//! A script document is an ordered sequence of entries, each either a
//! scene heading or an utterance. No other kind of entry exists.

use serde::{Deserialize, Serialize};

use crate::character::CharacterId;

/// What sort of text an utterance carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtteranceKind {
    /// Spoken lines
    Dialogue,
    /// Sung lyrics, introduced by a song title
    Song,
    /// Stage directions; never has a speaker
    Narration,
}

impl UtteranceKind {
    /// Dialogue and song are spoken by a character, narration is not
    pub fn is_speech(self) -> bool {
        !matches!(self, UtteranceKind::Narration)
    }
}

/// A block of dialogue, lyrics or narration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Source lines joined with single spaces
    pub text: String,
    pub kind: UtteranceKind,
    /// Set when the speaker line carried a `(CONT'D)` marker
    #[serde(default)]
    pub continued: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<CharacterId>,
    /// Reserved, never set by the parser
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listener: Option<CharacterId>,
    /// Reserved pronoun links, never set by the parser
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<CharacterId>,
}

impl Utterance {
    /// Start an empty dialogue or song block for a speaker
    pub fn spoken(kind: UtteranceKind, continued: bool, speaker: CharacterId) -> Self {
        Self {
            text: String::new(),
            kind,
            continued,
            speaker: Some(speaker),
            listener: None,
            references: Vec::new(),
        }
    }

    /// Start a narration block with its first line
    pub fn narration(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: UtteranceKind::Narration,
            continued: false,
            speaker: None,
            listener: None,
            references: Vec::new(),
        }
    }

    /// Append one source line, separated from existing text by a space
    pub fn push_line(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(line);
    }
}

/// A scene heading such as `INT. KITCHEN -- NIGHT`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SceneHeading {
    /// Relative time of day (`NIGHT`, `DAWN`), may be empty
    pub time: String,
    pub place: String,
}

impl SceneHeading {
    pub fn new(time: impl Into<String>, place: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            place: place.into(),
        }
    }
}

/// One entry of a script document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entry {
    Utterance(Utterance),
    SceneHeading(SceneHeading),
}

impl Entry {
    /// The utterance, if this entry is one
    pub fn as_utterance(&self) -> Option<&Utterance> {
        match self {
            Entry::Utterance(u) => Some(u),
            Entry::SceneHeading(_) => None,
        }
    }

    /// The scene heading, if this entry is one
    pub fn as_scene_heading(&self) -> Option<&SceneHeading> {
        match self {
            Entry::SceneHeading(h) => Some(h),
            Entry::Utterance(_) => None,
        }
    }
}

impl From<Utterance> for Entry {
    fn from(utterance: Utterance) -> Self {
        Entry::Utterance(utterance)
    }
}

impl From<SceneHeading> for Entry {
    fn from(heading: SceneHeading) -> Self {
        Entry::SceneHeading(heading)
    }
}

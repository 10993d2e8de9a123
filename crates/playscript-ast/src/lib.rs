//! playscript-ast - Document model for parsed play scripts
//!
//! This crate provides the types produced by the playscript parser:
//! scene headings, utterances (dialogue, song and narration) and the
//! deduplicated set of characters that speak them.

pub mod character;
pub mod content;
pub mod document;
pub mod registry;

pub use character::{Character, CharacterId, Personality, PersonalityTrait};
pub use content::{Entry, SceneHeading, Utterance, UtteranceKind};
pub use document::ScriptDocument;
pub use registry::{CharacterRegistry, RegistryError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Character registry
//!
//! Deduplicates characters by exact name within one document. The
//! registry only grows: characters are never removed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::character::{Character, CharacterId};

/// Name-keyed set of characters in first-appearance order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Character>", into = "Vec<Character>")]
pub struct CharacterRegistry {
    characters: Vec<Character>,
    by_name: HashMap<String, CharacterId>,
}

impl CharacterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the character with this exact name, registering it first if needed
    pub fn resolve_or_create(&mut self, name: &str) -> CharacterId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = CharacterId(self.characters.len());
        self.characters.push(Character::new(name));
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Look a character up by name without creating it
    pub fn find(&self, name: &str) -> Option<CharacterId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id.index())
    }

    /// Mutable access for writing classifier output back
    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(id.index())
    }

    /// Iterate characters with their handles, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (CharacterId, &Character)> {
        self.characters
            .iter()
            .enumerate()
            .map(|(i, c)| (CharacterId(i), c))
    }

    pub fn ids(&self) -> impl Iterator<Item = CharacterId> {
        (0..self.characters.len()).map(CharacterId)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

// The name index is derived data.
impl PartialEq for CharacterRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.characters == other.characters
    }
}

/// A character list that cannot be indexed by name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate character '{name}' at position {position}")]
    DuplicateName { name: String, position: usize },
}

// Positions are kept, since utterances refer to characters by index.
impl TryFrom<Vec<Character>> for CharacterRegistry {
    type Error = RegistryError;

    fn try_from(characters: Vec<Character>) -> Result<Self, Self::Error> {
        let mut registry = Self::new();
        for (position, character) in characters.into_iter().enumerate() {
            if registry.by_name.contains_key(&character.name) {
                return Err(RegistryError::DuplicateName {
                    name: character.name,
                    position,
                });
            }
            registry.by_name.insert(character.name.clone(), CharacterId(position));
            registry.characters.push(character);
        }
        Ok(registry)
    }
}

impl From<CharacterRegistry> for Vec<Character> {
    fn from(registry: CharacterRegistry) -> Self {
        registry.characters
    }
}

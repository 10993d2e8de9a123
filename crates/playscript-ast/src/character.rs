//! Character records and personality attributes
//!
//! A character is created the first time its name appears as a speaker
//! and lives for as long as the document does. The demographic and
//! personality fields start empty and are only filled in by an external
//! classifier after parsing has finished.

use serde::{Deserialize, Serialize};

/// Handle to a character inside a document's registry
///
/// Two utterances spoken by the same character carry equal handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub usize);

impl CharacterId {
    /// Position of the character in registration order
    pub fn index(self) -> usize {
        self.0
    }
}

/// The Big-5 personality dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalityTrait {
    Extroverted,
    Stable,
    Agreeable,
    Conscientious,
    Openness,
}

impl PersonalityTrait {
    /// All five traits in canonical order
    pub const ALL: [PersonalityTrait; 5] = [
        PersonalityTrait::Extroverted,
        PersonalityTrait::Stable,
        PersonalityTrait::Agreeable,
        PersonalityTrait::Conscientious,
        PersonalityTrait::Openness,
    ];

    /// Lowercase trait name
    pub fn as_str(self) -> &'static str {
        match self {
            PersonalityTrait::Extroverted => "extroverted",
            PersonalityTrait::Stable => "stable",
            PersonalityTrait::Agreeable => "agreeable",
            PersonalityTrait::Conscientious => "conscientious",
            PersonalityTrait::Openness => "openness",
        }
    }
}

/// Big-5 personality scores, all zero until classified
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Personality {
    pub extroverted: f64,
    pub stable: f64,
    pub agreeable: f64,
    pub conscientious: f64,
    pub openness: f64,
}

impl Personality {
    /// Read a single score
    pub fn get(&self, which: PersonalityTrait) -> f64 {
        match which {
            PersonalityTrait::Extroverted => self.extroverted,
            PersonalityTrait::Stable => self.stable,
            PersonalityTrait::Agreeable => self.agreeable,
            PersonalityTrait::Conscientious => self.conscientious,
            PersonalityTrait::Openness => self.openness,
        }
    }

    /// Overwrite a single score
    pub fn set(&mut self, which: PersonalityTrait, value: f64) {
        let slot = match which {
            PersonalityTrait::Extroverted => &mut self.extroverted,
            PersonalityTrait::Stable => &mut self.stable,
            PersonalityTrait::Agreeable => &mut self.agreeable,
            PersonalityTrait::Conscientious => &mut self.conscientious,
            PersonalityTrait::Openness => &mut self.openness,
        };
        *slot = value;
    }

    /// Scores in canonical trait order
    pub fn to_array(&self) -> [f64; 5] {
        PersonalityTrait::ALL.map(|t| self.get(t))
    }
}

/// A speaking (or singing) character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Name as printed on the speaker line, case-sensitive
    pub name: String,
    /// Free-form sex descriptor, usually empty
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub personality: Personality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
}

impl Character {
    /// Create an unclassified character
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sex: String::new(),
            personality: Personality::default(),
            gender: None,
            age_group: None,
        }
    }

    /// Whether an external classifier has filled in this character
    pub fn is_classified(&self) -> bool {
        self.gender.is_some() || self.age_group.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_character_is_blank() {
        let anna = Character::new("ANNA");
        assert_eq!(anna.name, "ANNA");
        assert!(anna.sex.is_empty());
        assert_eq!(anna.personality, Personality::default());
        assert!(!anna.is_classified());
    }

    #[test]
    fn test_personality_get_set() {
        let mut p = Personality::default();
        p.set(PersonalityTrait::Agreeable, 0.75);
        p.set(PersonalityTrait::Openness, -0.25);
        assert_eq!(p.get(PersonalityTrait::Agreeable), 0.75);
        assert_eq!(p.to_array(), [0.0, 0.0, 0.75, 0.0, -0.25]);
    }

    #[test]
    fn test_trait_names() {
        let names: Vec<_> = PersonalityTrait::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(
            names,
            vec!["extroverted", "stable", "agreeable", "conscientious", "openness"]
        );
    }
}

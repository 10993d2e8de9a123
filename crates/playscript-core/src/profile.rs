//! Character profiling seam
//!
//! Statistical classification of characters is done outside this crate.
//! A classifier plugs in through [`TraitPredictor`], which predicts
//! demographic labels and personality scores for a single piece of
//! speech; [`extract_personality`] runs it over every character's
//! dialogue and song text and writes the aggregate back onto the
//! document's characters.
//!
//! Aggregation per character:
//! - each personality score is the mean of the per-text predictions
//! - gender and age group are the most frequent per-text prediction,
//!   ties going to whichever label was predicted first

use std::collections::HashMap;

use playscript_ast::{CharacterId, Personality, PersonalityTrait, ScriptDocument};
use tracing::debug;

/// Per-utterance predictions supplied by an external classifier
pub trait TraitPredictor {
    fn gender(&self, text: &str) -> String;
    fn age_group(&self, text: &str) -> String;
    fn score(&self, which: PersonalityTrait, text: &str) -> f64;
}

/// Aggregated classification of one character
#[derive(Debug, Clone, PartialEq)]
pub struct TraitProfile {
    pub gender: String,
    pub age_group: String,
    pub personality: Personality,
}

/// Aggregate predictions over one character's texts
///
/// Returns `None` when there is nothing to classify.
pub fn profile_texts<P>(texts: &[&str], predictor: &P) -> Option<TraitProfile>
where
    P: TraitPredictor + ?Sized,
{
    if texts.is_empty() {
        return None;
    }

    let genders: Vec<String> = texts.iter().map(|t| predictor.gender(t)).collect();
    let age_groups: Vec<String> = texts.iter().map(|t| predictor.age_group(t)).collect();

    let count = texts.len() as f64;
    let mut personality = Personality::default();
    for which in PersonalityTrait::ALL {
        let total: f64 = texts.iter().map(|t| predictor.score(which, t)).sum();
        personality.set(which, total / count);
    }

    Some(TraitProfile {
        gender: most_frequent(&genders)?,
        age_group: most_frequent(&age_groups)?,
        personality,
    })
}

/// Classify every speaking character and write the results back
///
/// Characters without dialogue or song text are left untouched.
/// Returns the number of characters updated.
pub fn extract_personality<P>(doc: &mut ScriptDocument, predictor: &P) -> usize
where
    P: TraitPredictor + ?Sized,
{
    let ids: Vec<CharacterId> = doc.characters().ids().collect();
    let mut updated = 0;

    for id in ids {
        let profile = {
            let texts: Vec<&str> = doc.speech_of(id).collect();
            profile_texts(&texts, predictor)
        };
        let Some(profile) = profile else {
            continue;
        };
        if let Some(character) = doc.characters_mut().get_mut(id) {
            debug!(
                name = %character.name,
                gender = %profile.gender,
                age_group = %profile.age_group,
                "Profiled character"
            );
            character.gender = Some(profile.gender);
            character.age_group = Some(profile.age_group);
            character.personality = profile.personality;
            updated += 1;
        }
    }

    updated
}

/// Most frequent label, earliest first on ties
fn most_frequent(labels: &[String]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label.as_str()).or_default() += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for label in labels {
        let count = counts[label.as_str()];
        if best.map_or(true, |(_, n)| count > n) {
            best = Some((label.as_str(), count));
        }
    }
    best.map(|(label, _)| label.to_string())
}

#[cfg(test)]
#[path = "verb_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Serialize;

use super::Depth;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub verb: String,
    #[serde(default)]
    pub complexity: String,
    pub overview: Option<String>,
    pub special_notes: Option<String>,
    pub recommended_practice: Option<String>,
}

impl Assessment {
    pub fn recommended_depth(&self) -> Depth {
        return Depth::from_recommendation(self.recommended_practice.as_deref());
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conjugation {
    pub pronoun: String,
    pub tense: String,
    pub mood: String,
    pub form: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeaningCard {
    pub verb: String,
    pub english_meaning: Option<String>,
    pub example_sentence: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbConjugations {
    pub verb: String,
    pub overview: Option<String>,
    pub notes: Option<String>,
    pub related_verbs: Option<Vec<String>>,
    pub conjugations: Option<Vec<Conjugation>>,
}

/// Result of a generation request, tagged with the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    Meaning(MeaningCard),
    /// `depth` is `None` when produced by the single-stage flow.
    Conjugations {
        depth: Option<Depth>,
        data: VerbConjugations,
    },
}

impl Generation {
    pub fn verb(&self) -> &str {
        return match self {
            Generation::Meaning(card) => &card.verb,
            Generation::Conjugations { data, .. } => &data.verb,
        };
    }

    pub fn depth(&self) -> Option<Depth> {
        return match self {
            Generation::Meaning(_) => Some(Depth::MeaningOnly),
            Generation::Conjugations { depth, .. } => *depth,
        };
    }

    /// Presence check used before saving.
    pub fn has_content(&self) -> bool {
        return match self {
            Generation::Meaning(card) => card
                .english_meaning
                .as_ref()
                .map(|meaning| return !meaning.is_empty())
                .unwrap_or(false),
            Generation::Conjugations { data, .. } => data
                .conjugations
                .as_ref()
                .map(|conjugations| return !conjugations.is_empty())
                .unwrap_or(false),
        };
    }
}

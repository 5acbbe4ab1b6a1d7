#[cfg(test)]
#[path = "cards_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::Generation;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbCard {
    pub verb: String,
    pub pronoun: String,
    pub tense: String,
    pub mood: String,
    pub conjugated_form: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceCard {
    pub spanish_sentence: String,
    pub english_translation: String,
    pub grammar_notes: String,
}

/// Body sent to the card store. Exactly one shape is sent per save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavePayload {
    VerbCards(Vec<VerbCard>),
    SentenceCards(Vec<SentenceCard>),
}

impl SavePayload {
    /// Builds the payload for the generation currently on screen. Returns
    /// `None` when there is nothing to save.
    pub fn from_generation(generation: &Generation) -> Option<SavePayload> {
        if !generation.has_content() {
            return None;
        }

        match generation {
            Generation::Meaning(card) => {
                let example = card.example_sentence.clone().unwrap_or_default();
                return Some(SavePayload::SentenceCards(vec![SentenceCard {
                    spanish_sentence: card.verb.to_string(),
                    english_translation: card.english_meaning.clone().unwrap_or_default(),
                    grammar_notes: format!("Meaning card: {example}"),
                }]));
            }
            Generation::Conjugations { data, .. } => {
                let cards = data
                    .conjugations
                    .iter()
                    .flatten()
                    .map(|conjugation| {
                        return VerbCard {
                            verb: data.verb.to_string(),
                            pronoun: conjugation.pronoun.to_string(),
                            tense: conjugation.tense.to_string(),
                            mood: conjugation.mood.to_string(),
                            conjugated_form: conjugation.form.to_string(),
                        };
                    })
                    .collect::<Vec<VerbCard>>();

                return Some(SavePayload::VerbCards(cards));
            }
        }
    }

    pub fn len(&self) -> usize {
        return match self {
            SavePayload::VerbCards(cards) => cards.len(),
            SavePayload::SentenceCards(cards) => cards.len(),
        };
    }

    pub fn is_empty(&self) -> bool {
        return self.len() == 0;
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, EnumIter, EnumVariantNames, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CardType {
    Verb,
    Sentence,
}

impl CardType {
    pub fn parse(text: &str) -> Option<CardType> {
        return CardType::iter().find(|e| return e.to_string() == text);
    }
}

/// A card as returned by the card store listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCard {
    pub id: i64,
    pub card_type: CardType,
    pub verb: Option<String>,
    pub pronoun: Option<String>,
    pub tense: Option<String>,
    pub mood: Option<String>,
    pub conjugated_form: Option<String>,
    pub spanish_sentence: Option<String>,
    pub english_translation: Option<String>,
    pub grammar_notes: Option<String>,
}

impl StoredCard {
    pub fn format(&self) -> String {
        let field = |value: &Option<String>| return value.clone().unwrap_or_default();

        return match self.card_type {
            CardType::Verb => format!(
                "- (ID: {}) [verb] {} {} ({} {}) = {}",
                self.id,
                field(&self.pronoun),
                field(&self.verb),
                field(&self.tense),
                field(&self.mood),
                field(&self.conjugated_form)
            ),
            CardType::Sentence => format!(
                "- (ID: {}) [sentence] {} = {}",
                self.id,
                field(&self.spanish_sentence),
                field(&self.english_translation)
            ),
        };
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardList {
    pub cards: Vec<StoredCard>,
    pub count: usize,
}

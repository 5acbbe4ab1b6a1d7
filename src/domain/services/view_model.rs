#[cfg(test)]
#[path = "view_model_test.rs"]
mod tests;

use strum::IntoEnumIterator;

use super::AppState;
use crate::domain::models::Assessment;
use crate::domain::models::Conjugation;
use crate::domain::models::Depth;
use crate::domain::models::Generation;
use crate::domain::models::MeaningCard;
use crate::domain::models::SaveButton;
use crate::domain::models::Session;
use crate::domain::models::VerbConjugations;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepthOption {
    pub depth: Depth,
    pub label: &'static str,
    pub hotkey: &'static str,
    pub recommended: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssessmentView {
    pub title: String,
    pub complexity: String,
    pub overview: String,
    pub notes: String,
    pub recommended_practice: String,
    pub options: Vec<DepthOption>,
}

/// Front and back of a single preview card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardPreview {
    Conjugation {
        pronoun: String,
        verb: String,
        tense_mood: String,
        form: String,
    },
    Meaning {
        verb: String,
        english_meaning: String,
        example: Option<String>,
    },
}

impl CardPreview {
    pub fn front(&self) -> String {
        return match self {
            CardPreview::Conjugation {
                pronoun,
                verb,
                tense_mood,
                ..
            } => format!("{pronoun} {verb} ({tense_mood})"),
            CardPreview::Meaning { verb, .. } => verb.to_string(),
        };
    }

    pub fn back(&self) -> Vec<String> {
        match self {
            CardPreview::Conjugation { form, .. } => return vec![form.to_string()],
            CardPreview::Meaning {
                english_meaning,
                example,
                ..
            } => {
                let mut lines = vec![english_meaning.to_string()];
                if let Some(example) = example {
                    lines.push(example.to_string());
                }

                return lines;
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelatedVerbs {
    Tags(Vec<String>),
    Placeholder(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsView {
    pub title: String,
    pub overview: String,
    pub notes: String,
    pub related_verbs: RelatedVerbs,
    pub cards: Vec<CardPreview>,
    /// Shown in place of the grid when there is nothing to preview.
    pub placeholder: Option<&'static str>,
    pub count_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SectionView {
    Idle,
    Loading(String),
    Assessment(AssessmentView),
    Results(ResultsView),
    Error(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveButtonView {
    pub label: &'static str,
    pub enabled: bool,
    pub confirmed: bool,
}

/// Everything the renderer needs, derived purely from `AppState`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewModel {
    pub section: SectionView,
    pub save_button: SaveButtonView,
    pub submit_enabled: bool,
    pub notice: Option<String>,
    pub hints: Vec<(&'static str, &'static str)>,
}

fn or_fallback(value: &Option<String>, fallback: &str) -> String {
    return match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    };
}

fn assessment_view(assessment: &Assessment) -> AssessmentView {
    let recommended = assessment.recommended_depth();
    let recommended_practice = assessment
        .recommended_practice
        .clone()
        .unwrap_or_else(|| return Depth::Core.to_string())
        .replacen('_', " ", 1);

    let options = Depth::iter()
        .map(|depth| {
            return DepthOption {
                depth,
                label: depth.option_label(),
                hotkey: depth.hotkey(),
                recommended: depth == recommended,
            };
        })
        .collect::<Vec<DepthOption>>();

    return AssessmentView {
        title: format!("Analysis: {}", assessment.verb),
        complexity: assessment.complexity.to_string(),
        overview: or_fallback(&assessment.overview, "No overview available"),
        notes: or_fallback(&assessment.special_notes, "No special notes"),
        recommended_practice,
        options,
    };
}

fn meaning_view(card: &MeaningCard) -> ResultsView {
    return ResultsView {
        title: format!("Verb: {}", card.verb),
        overview: or_fallback(&card.english_meaning, "Translation provided"),
        notes: or_fallback(&card.example_sentence, "No example provided"),
        related_verbs: RelatedVerbs::Placeholder("N/A for meaning cards"),
        cards: vec![CardPreview::Meaning {
            verb: card.verb.to_string(),
            english_meaning: card.english_meaning.clone().unwrap_or_default(),
            example: card
                .example_sentence
                .clone()
                .filter(|example| return !example.is_empty()),
        }],
        placeholder: None,
        count_label: "1 meaning card generated".to_string(),
    };
}

fn conjugation_card(verb: &str, conjugation: &Conjugation) -> CardPreview {
    return CardPreview::Conjugation {
        pronoun: conjugation.pronoun.to_string(),
        verb: verb.to_string(),
        tense_mood: format!("{} {}", conjugation.tense, conjugation.mood),
        form: conjugation.form.to_string(),
    };
}

fn conjugations_view(depth: Option<Depth>, data: &VerbConjugations) -> ResultsView {
    let related_verbs = match &data.related_verbs {
        Some(verbs) if !verbs.is_empty() => RelatedVerbs::Tags(verbs.clone()),
        _ => RelatedVerbs::Placeholder("None provided"),
    };

    let cards = data
        .conjugations
        .iter()
        .flatten()
        .map(|conjugation| return conjugation_card(&data.verb, conjugation))
        .collect::<Vec<CardPreview>>();

    let (placeholder, count_label) = if cards.is_empty() {
        (
            Some("No conjugations generated"),
            "0 cards generated".to_string(),
        )
    } else {
        let type_label = match depth {
            Some(Depth::Core) => "core ",
            Some(_) => "complete ",
            None => "",
        };
        (None, format!("{} {type_label}cards generated", cards.len()))
    };

    return ResultsView {
        title: format!("Verb: {}", data.verb),
        overview: or_fallback(&data.overview, "No overview available"),
        notes: or_fallback(&data.notes, "No special notes"),
        related_verbs,
        cards,
        placeholder,
        count_label,
    };
}

pub fn results_view(generation: &Generation) -> ResultsView {
    return match generation {
        Generation::Meaning(card) => meaning_view(card),
        Generation::Conjugations { depth, data } => conjugations_view(*depth, data),
    };
}

fn hints(session: &Session) -> Vec<(&'static str, &'static str)> {
    let mut hints = match session {
        Session::Idle => vec![("Enter", "Submit verb")],
        Session::Loading { .. } => vec![],
        Session::Assessment(_) => vec![
            ("F1", "Meaning only"),
            ("F2", "Core"),
            ("F3", "Full"),
            ("Enter", "New verb"),
        ],
        Session::Results(_) => vec![
            ("Ctrl+S", "Save all cards"),
            ("Ctrl+N", "Generate another"),
            ("Up/Down", "Scroll"),
        ],
        Session::Error { .. } => vec![("Ctrl+R", "Retry"), ("Enter", "New verb")],
    };
    hints.push(("Ctrl+C", "Quit"));

    return hints;
}

impl ViewModel {
    pub fn build(app_state: &AppState) -> ViewModel {
        let section = match &app_state.session {
            Session::Idle => SectionView::Idle,
            Session::Loading { stage, .. } => {
                SectionView::Loading(stage.loading_message().to_string())
            }
            Session::Assessment(assessment) => {
                SectionView::Assessment(assessment_view(assessment))
            }
            Session::Results(generation) => SectionView::Results(results_view(generation)),
            Session::Error { message, .. } => SectionView::Error(message.to_string()),
        };

        return ViewModel {
            section,
            save_button: SaveButtonView {
                label: app_state.save_button.label(),
                enabled: app_state.save_button.is_enabled(),
                confirmed: matches!(app_state.save_button, SaveButton::Confirmed(_)),
            },
            submit_enabled: app_state.submit_enabled(),
            notice: app_state.notice.clone(),
            hints: hints(&app_state.session),
        };
    }
}

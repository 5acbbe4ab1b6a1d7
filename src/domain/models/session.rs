#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::Assessment;
use super::Depth;
use super::Generation;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Flow {
    /// Assess first, then generate at a chosen depth.
    TwoStage,
    /// Generate the full conjugation set immediately.
    SingleStage,
}

impl Flow {
    pub fn parse(text: &str) -> Option<Flow> {
        return Flow::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Assessing,
    /// `None` is the single-stage generation.
    Generating(Option<Depth>),
}

impl Stage {
    pub fn loading_message(&self) -> &'static str {
        return match self {
            Stage::Assessing => "Analyzing verb complexity...",
            Stage::Generating(Some(depth)) => depth.loading_message(),
            Stage::Generating(None) => "Generating conjugations...",
        };
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Loading,
    Assessment,
    Results,
    Error,
}

/// The single live session slot. Replaced as a whole on every transition.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Idle,
    Loading {
        verb: String,
        stage: Stage,
    },
    Assessment(Assessment),
    Results(Generation),
    Error {
        message: String,
        /// Verb to use when retrying. `None` when nothing was ever submitted.
        verb: Option<String>,
    },
}

impl Session {
    /// Section currently on screen. Idle shows only the verb input.
    pub fn section(&self) -> Option<Section> {
        return match self {
            Session::Idle => None,
            Session::Loading { .. } => Some(Section::Loading),
            Session::Assessment(_) => Some(Section::Assessment),
            Session::Results(_) => Some(Section::Results),
            Session::Error { .. } => Some(Section::Error),
        };
    }

    pub fn verb(&self) -> Option<&str> {
        return match self {
            Session::Idle => None,
            Session::Loading { verb, .. } => Some(verb),
            Session::Assessment(assessment) => Some(&assessment.verb),
            Session::Results(generation) => Some(generation.verb()),
            Session::Error { verb, .. } => verb.as_deref(),
        };
    }

    pub fn is_loading(&self) -> bool {
        return matches!(self, Session::Loading { .. });
    }
}

/// Save control state. Ids tie the confirmation window to the save that
/// opened it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SaveButton {
    #[default]
    Ready,
    Saving(u64),
    Confirmed(u64),
}

impl SaveButton {
    pub fn label(&self) -> &'static str {
        return match self {
            SaveButton::Ready => "Save All Cards",
            SaveButton::Saving(_) => "Saving...",
            SaveButton::Confirmed(_) => "Cards Saved!",
        };
    }

    pub fn is_enabled(&self) -> bool {
        return *self == SaveButton::Ready;
    }
}

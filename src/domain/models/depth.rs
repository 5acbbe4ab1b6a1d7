#[cfg(test)]
#[path = "depth_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// Generation granularity requested for a verb.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumIter,
    EnumVariantNames,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Depth {
    /// A single translation card.
    MeaningOnly,
    /// A reduced conjugation set.
    Core,
    /// The complete conjugation set.
    Full,
}

impl Depth {
    pub fn parse(text: &str) -> Option<Depth> {
        return Depth::iter().find(|e| return e.to_string() == text);
    }

    /// Maps a backend recommendation onto a depth. A missing recommendation
    /// means core, anything unrecognised means full.
    pub fn from_recommendation(recommendation: Option<&str>) -> Depth {
        return match recommendation {
            None => Depth::Core,
            Some(text) => Depth::parse(text).unwrap_or(Depth::Full),
        };
    }

    pub fn option_label(&self) -> &'static str {
        return match self {
            Depth::MeaningOnly => "Meaning only",
            Depth::Core => "Core",
            Depth::Full => "Full",
        };
    }

    pub fn hotkey(&self) -> &'static str {
        return match self {
            Depth::MeaningOnly => "F1",
            Depth::Core => "F2",
            Depth::Full => "F3",
        };
    }

    pub fn loading_message(&self) -> &'static str {
        return match self {
            Depth::MeaningOnly => "Generating meaning card...",
            Depth::Core => "Generating core conjugations...",
            Depth::Full => "Generating complete conjugations...",
        };
    }
}

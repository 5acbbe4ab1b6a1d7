use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::Assessment;
use super::CardList;
use super::CardType;
use super::Depth;
use super::Generation;
use super::SavePayload;

/// Plain acknowledgement returned by the card store.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: Option<String>,
}

#[async_trait]
pub trait Backend {
    /// Used at startup to verify the flashcards API is reachable.
    async fn health_check(&self) -> Result<()>;

    /// First stage of the two-stage flow. Classifies the verb and recommends
    /// a generation depth.
    async fn assess_verb(&self, verb: &str) -> Result<Assessment, ApiError>;

    /// Second stage of the two-stage flow. The shape of the result depends on
    /// the requested depth.
    async fn generate_verb_targeted(&self, verb: &str, depth: Depth)
        -> Result<Generation, ApiError>;

    /// Single-stage flow, always returns conjugations.
    async fn generate_verb(&self, verb: &str) -> Result<Generation, ApiError>;

    async fn save_cards(&self, payload: &SavePayload) -> Result<ApiMessage, ApiError>;

    async fn list_cards(&self) -> Result<CardList, ApiError>;

    async fn delete_card(&self, id: i64, card_type: CardType) -> Result<ApiMessage, ApiError>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;

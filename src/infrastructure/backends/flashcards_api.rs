#[cfg(test)]
#[path = "flashcards_api_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ApiError;
use crate::domain::models::ApiMessage;
use crate::domain::models::Assessment;
use crate::domain::models::Backend;
use crate::domain::models::CardList;
use crate::domain::models::CardType;
use crate::domain::models::Depth;
use crate::domain::models::Generation;
use crate::domain::models::MeaningCard;
use crate::domain::models::SavePayload;
use crate::domain::models::VerbConjugations;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct VerbRequest {
    verb: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TargetedRequest {
    verb: String,
    depth: Depth,
}

/// Pulls a truthy `error` field out of an otherwise successful body.
fn error_field(body: &Value) -> Option<String> {
    return match body.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.to_string()),
        other => Some(other.to_string()),
    };
}

async fn read_response<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ApiError> {
    let status = res.status();
    if !status.is_success() {
        tracing::error!(
            status = status.as_u16(),
            url = res.url().to_string(),
            "Flashcards API request failed"
        );
        return Err(ApiError::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        });
    }

    let body: Value = serde_json::from_str(&res.text().await?)?;
    if let Some(message) = error_field(&body) {
        tracing::error!(error = message.as_str(), "Flashcards API returned an error");
        return Err(ApiError::Application(message));
    }

    tracing::debug!(body = ?body, "Flashcards API response");
    return Ok(serde_json::from_value(body)?);
}

pub struct FlashcardsApi {
    url: String,
    timeout: String,
}

impl Default for FlashcardsApi {
    fn default() -> FlashcardsApi {
        return FlashcardsApi {
            url: Config::api_url(),
            timeout: Config::get(ConfigKey::HealthCheckTimeout),
        };
    }
}

impl FlashcardsApi {
    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let res = reqwest::Client::new()
            .post(format!("{url}{path}", url = self.url))
            .json(body)
            .send()
            .await?;

        return read_response(res).await;
    }
}

#[async_trait]
impl Backend for FlashcardsApi {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(format!("{url}/api/health", url = self.url))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Flashcards API is not reachable");
                bail!("Flashcards API is not reachable at {}", self.url);
            }
        };

        if res.status() != 200 {
            tracing::error!(
                status = res.status().as_u16(),
                "Flashcards API health check failed"
            );
            bail!("Flashcards API health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn assess_verb(&self, verb: &str) -> Result<Assessment, ApiError> {
        let req = VerbRequest {
            verb: verb.to_string(),
        };

        return self.post("/api/assess-verb", &req).await;
    }

    #[allow(clippy::implicit_return)]
    async fn generate_verb_targeted(
        &self,
        verb: &str,
        depth: Depth,
    ) -> Result<Generation, ApiError> {
        let req = TargetedRequest {
            verb: verb.to_string(),
            depth,
        };

        if depth == Depth::MeaningOnly {
            let card: MeaningCard = self.post("/api/generate-verb-targeted", &req).await?;
            return Ok(Generation::Meaning(card));
        }

        let data: VerbConjugations = self.post("/api/generate-verb-targeted", &req).await?;
        return Ok(Generation::Conjugations {
            depth: Some(depth),
            data,
        });
    }

    #[allow(clippy::implicit_return)]
    async fn generate_verb(&self, verb: &str) -> Result<Generation, ApiError> {
        let req = VerbRequest {
            verb: verb.to_string(),
        };

        let data: VerbConjugations = self.post("/api/generate-verb", &req).await?;
        return Ok(Generation::Conjugations { depth: None, data });
    }

    #[allow(clippy::implicit_return)]
    async fn save_cards(&self, payload: &SavePayload) -> Result<ApiMessage, ApiError> {
        return self.post("/api/cards", payload).await;
    }

    #[allow(clippy::implicit_return)]
    async fn list_cards(&self) -> Result<CardList, ApiError> {
        let res = reqwest::Client::new()
            .get(format!("{url}/api/cards", url = self.url))
            .send()
            .await?;

        return read_response(res).await;
    }

    #[allow(clippy::implicit_return)]
    async fn delete_card(&self, id: i64, card_type: CardType) -> Result<ApiMessage, ApiError> {
        let res = reqwest::Client::new()
            .delete(format!("{url}/api/cards/{id}", url = self.url))
            .query(&[("type", card_type.to_string())])
            .send()
            .await?;

        return read_response(res).await;
    }
}

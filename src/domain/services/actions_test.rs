use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::timeout;

use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::ApiError;
use crate::domain::models::ApiMessage;
use crate::domain::models::Assessment;
use crate::domain::models::Backend;
use crate::domain::models::BackendResponse;
use crate::domain::models::CardList;
use crate::domain::models::CardType;
use crate::domain::models::Depth;
use crate::domain::models::Event;
use crate::domain::models::Generation;
use crate::domain::models::MeaningCard;
use crate::domain::models::SavePayload;
use crate::domain::models::VerbCard;
use crate::domain::models::VerbConjugations;

#[derive(Default)]
struct StubBackend {
    fail_save: bool,
}

#[async_trait]
impl Backend for StubBackend {
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn assess_verb(&self, verb: &str) -> Result<Assessment, ApiError> {
        return Ok(Assessment {
            verb: verb.to_string(),
            complexity: "regular".to_string(),
            ..Assessment::default()
        });
    }

    async fn generate_verb_targeted(
        &self,
        verb: &str,
        depth: Depth,
    ) -> Result<Generation, ApiError> {
        if depth == Depth::MeaningOnly {
            return Ok(Generation::Meaning(MeaningCard {
                verb: verb.to_string(),
                ..MeaningCard::default()
            }));
        }

        return Ok(Generation::Conjugations {
            depth: Some(depth),
            data: VerbConjugations {
                verb: verb.to_string(),
                ..VerbConjugations::default()
            },
        });
    }

    async fn generate_verb(&self, verb: &str) -> Result<Generation, ApiError> {
        return Ok(Generation::Conjugations {
            depth: None,
            data: VerbConjugations {
                verb: verb.to_string(),
                ..VerbConjugations::default()
            },
        });
    }

    async fn save_cards(&self, _payload: &SavePayload) -> Result<ApiMessage, ApiError> {
        if self.fail_save {
            return Err(ApiError::Http {
                status: 500,
                reason: "Internal Server Error".to_string(),
            });
        }

        return Ok(ApiMessage {
            message: Some("Saved 1 cards".to_string()),
        });
    }

    async fn list_cards(&self) -> Result<CardList, ApiError> {
        return Ok(CardList::default());
    }

    async fn delete_card(&self, _id: i64, _card_type: CardType) -> Result<ApiMessage, ApiError> {
        return Ok(ApiMessage::default());
    }
}

fn payload() -> SavePayload {
    return SavePayload::VerbCards(vec![VerbCard {
        verb: "hablar".to_string(),
        pronoun: "yo".to_string(),
        tense: "present".to_string(),
        mood: "indicative".to_string(),
        conjugated_form: "hablo".to_string(),
    }]);
}

async fn run(backend: StubBackend, actions: Vec<Action>) -> mpsc::UnboundedReceiver<Event> {
    let (tx, rx) = mpsc::unbounded_channel::<Event>();
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    for action in actions {
        action_tx.send(action).unwrap();
    }
    drop(action_tx);

    ActionsService::start(
        Box::new(backend),
        Duration::from_millis(20),
        tx,
        &mut action_rx,
    )
    .await
    .unwrap();

    return rx;
}

async fn next_response(rx: &mut mpsc::UnboundedReceiver<Event>) -> Result<BackendResponse> {
    match timeout(Duration::from_secs(2), rx.recv()).await? {
        Some(Event::BackendResponse(res)) => return Ok(res),
        _ => bail!("Expected a backend response"),
    }
}

#[tokio::test]
async fn it_tags_assessment_with_request_id() -> Result<()> {
    let mut rx = run(
        StubBackend::default(),
        vec![Action::AssessVerb(7, "hablar".to_string())],
    )
    .await;

    match next_response(&mut rx).await? {
        BackendResponse::Assessment(7, Ok(assessment)) => {
            assert_eq!(assessment.verb, "hablar");
        }
        res => bail!("Unexpected response {res:?}"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_routes_depth_to_targeted_generation() -> Result<()> {
    let mut rx = run(
        StubBackend::default(),
        vec![Action::GenerateVerb(
            2,
            "comer".to_string(),
            Some(Depth::MeaningOnly),
        )],
    )
    .await;

    match next_response(&mut rx).await? {
        BackendResponse::Generation(2, Ok(Generation::Meaning(card))) => {
            assert_eq!(card.verb, "comer");
        }
        res => bail!("Unexpected response {res:?}"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_uses_single_stage_generation_without_depth() -> Result<()> {
    let mut rx = run(
        StubBackend::default(),
        vec![Action::GenerateVerb(3, "vivir".to_string(), None)],
    )
    .await;

    match next_response(&mut rx).await? {
        BackendResponse::Generation(3, Ok(generation)) => {
            assert_eq!(generation.depth(), None);
            assert_eq!(generation.verb(), "vivir");
        }
        res => bail!("Unexpected response {res:?}"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_confirms_then_elapses_save() -> Result<()> {
    let mut rx = run(
        StubBackend::default(),
        vec![Action::SaveCards(1, payload())],
    )
    .await;

    assert!(matches!(
        next_response(&mut rx).await?,
        BackendResponse::Save(1, Ok(_))
    ));
    assert!(matches!(
        next_response(&mut rx).await?,
        BackendResponse::SaveConfirmationElapsed(1)
    ));

    return Ok(());
}

#[tokio::test]
async fn it_skips_confirmation_timer_on_failed_save() -> Result<()> {
    let mut rx = run(
        StubBackend { fail_save: true },
        vec![Action::SaveCards(1, payload())],
    )
    .await;

    match next_response(&mut rx).await? {
        BackendResponse::Save(1, Err(err)) => {
            insta::assert_snapshot!(err.to_string(), @"HTTP 500: Internal Server Error");
        }
        res => bail!("Unexpected response {res:?}"),
    }

    assert!(timeout(Duration::from_millis(100), rx.recv())
        .await?
        .is_none());

    return Ok(());
}

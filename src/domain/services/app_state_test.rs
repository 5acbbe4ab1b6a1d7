use anyhow::bail;
use anyhow::Result;
use test_utils::assessment_fixture;
use test_utils::conjugations_fixture;

use super::AppState;
use crate::domain::models::Action;
use crate::domain::models::ApiError;
use crate::domain::models::ApiMessage;
use crate::domain::models::Assessment;
use crate::domain::models::BackendResponse;
use crate::domain::models::Depth;
use crate::domain::models::Effect;
use crate::domain::models::Flow;
use crate::domain::models::Generation;
use crate::domain::models::Intent;
use crate::domain::models::MeaningCard;
use crate::domain::models::SaveButton;
use crate::domain::models::SavePayload;
use crate::domain::models::Session;
use crate::domain::models::Stage;
use crate::domain::models::VerbConjugations;

fn single_action(effects: Vec<Effect>) -> Result<Action> {
    if effects.len() != 1 {
        bail!("Expected exactly one effect, got {}", effects.len());
    }

    match effects.into_iter().next() {
        Some(Effect::Dispatch(action)) => return Ok(action),
        _ => bail!("Expected a dispatched action"),
    }
}

fn assessment() -> Assessment {
    return serde_json::from_str(assessment_fixture()).unwrap();
}

fn conjugations(depth: Option<Depth>) -> Generation {
    let data: VerbConjugations = serde_json::from_str(conjugations_fixture()).unwrap();
    return Generation::Conjugations { depth, data };
}

/// Drives a two-stage session up to the results section.
fn results_state(generation: Generation) -> Result<AppState> {
    let mut app_state = AppState::new(Flow::TwoStage);
    let id = match single_action(app_state.update(Intent::Submit("hablar".to_string())))? {
        Action::AssessVerb(id, _) => id,
        _ => bail!("Wrong action"),
    };
    app_state.update(Intent::Backend(BackendResponse::Assessment(
        id,
        Ok(assessment()),
    )));

    let id = match single_action(app_state.update(Intent::ChooseDepth(Depth::Core)))? {
        Action::GenerateVerb(id, _, _) => id,
        _ => bail!("Wrong action"),
    };
    app_state.update(Intent::Backend(BackendResponse::Generation(
        id,
        Ok(generation),
    )));

    return Ok(app_state);
}

mod submit {
    use super::*;

    #[test]
    fn it_assesses_trimmed_lowercase_verb() -> Result<()> {
        let mut app_state = AppState::new(Flow::TwoStage);
        let action = single_action(app_state.update(Intent::Submit("  HaBLAR \n".to_string())))?;

        match action {
            Action::AssessVerb(_, verb) => assert_eq!(verb, "hablar"),
            _ => bail!("Wrong action"),
        }
        assert_eq!(
            app_state.session,
            Session::Loading {
                verb: "hablar".to_string(),
                stage: Stage::Assessing
            }
        );
        assert!(!app_state.submit_enabled());

        return Ok(());
    }

    #[test]
    fn it_generates_directly_in_single_stage() -> Result<()> {
        let mut app_state = AppState::new(Flow::SingleStage);
        let action = single_action(app_state.update(Intent::Submit("Tener".to_string())))?;

        match action {
            Action::GenerateVerb(_, verb, depth) => {
                assert_eq!(verb, "tener");
                assert_eq!(depth, None);
            }
            _ => bail!("Wrong action"),
        }
        assert_eq!(
            app_state.session,
            Session::Loading {
                verb: "tener".to_string(),
                stage: Stage::Generating(None)
            }
        );

        return Ok(());
    }

    #[test]
    fn it_rejects_blank_input_without_request() {
        let mut app_state = AppState::new(Flow::TwoStage);
        let effects = app_state.update(Intent::Submit("   \t".to_string()));

        assert!(effects.is_empty());
        assert_eq!(
            app_state.session,
            Session::Error {
                message: "Please enter a verb".to_string(),
                verb: None
            }
        );
    }

    #[test]
    fn it_ignores_submit_while_loading() {
        let mut app_state = AppState::new(Flow::TwoStage);
        app_state.update(Intent::Submit("ir".to_string()));
        let effects = app_state.update(Intent::Submit("ser".to_string()));

        assert!(effects.is_empty());
        assert_eq!(app_state.session.verb(), Some("ir"));
    }
}

mod assessment {
    use super::*;

    #[test]
    fn it_stores_assessment_on_success() {
        let mut app_state = AppState::new(Flow::TwoStage);
        app_state.update(Intent::Submit("hablar".to_string()));
        app_state.update(Intent::Backend(BackendResponse::Assessment(
            1,
            Ok(assessment()),
        )));

        assert_eq!(app_state.session, Session::Assessment(assessment()));
    }

    #[test]
    fn it_shows_error_on_failure() {
        let mut app_state = AppState::new(Flow::TwoStage);
        app_state.update(Intent::Submit("hablar".to_string()));
        app_state.update(Intent::Backend(BackendResponse::Assessment(
            1,
            Err(ApiError::Http {
                status: 502,
                reason: "Bad Gateway".to_string(),
            }),
        )));

        assert_eq!(
            app_state.session,
            Session::Error {
                message: "HTTP 502: Bad Gateway".to_string(),
                verb: Some("hablar".to_string())
            }
        );
    }

    #[test]
    fn it_falls_back_to_default_message() {
        let mut app_state = AppState::new(Flow::TwoStage);
        app_state.update(Intent::Submit("hablar".to_string()));
        app_state.update(Intent::Backend(BackendResponse::Assessment(
            1,
            Err(ApiError::Unexpected("".to_string())),
        )));

        assert_eq!(
            app_state.session,
            Session::Error {
                message: "Failed to assess verb".to_string(),
                verb: Some("hablar".to_string())
            }
        );
    }

    #[test]
    fn it_drops_stale_responses() {
        let mut app_state = AppState::new(Flow::TwoStage);
        app_state.update(Intent::Submit("hablar".to_string()));
        app_state.update(Intent::Backend(BackendResponse::Assessment(
            1,
            Err(ApiError::Unexpected("network".to_string())),
        )));
        app_state.update(Intent::Retry);

        // The first request answering late must not clobber the retry.
        app_state.update(Intent::Backend(BackendResponse::Assessment(
            1,
            Ok(assessment()),
        )));

        assert!(app_state.session.is_loading());
    }

    #[test]
    fn it_generates_chosen_depth_for_assessed_verb() -> Result<()> {
        let mut app_state = AppState::new(Flow::TwoStage);
        app_state.update(Intent::Submit("hablar".to_string()));
        app_state.update(Intent::Backend(BackendResponse::Assessment(
            1,
            Ok(assessment()),
        )));

        let action = single_action(app_state.update(Intent::ChooseDepth(Depth::Full)))?;
        match action {
            Action::GenerateVerb(id, verb, depth) => {
                assert_eq!(id, 2);
                assert_eq!(verb, "hablar");
                assert_eq!(depth, Some(Depth::Full));
            }
            _ => bail!("Wrong action"),
        }
        assert_eq!(
            app_state.session,
            Session::Loading {
                verb: "hablar".to_string(),
                stage: Stage::Generating(Some(Depth::Full))
            }
        );

        return Ok(());
    }

    #[test]
    fn it_ignores_depth_outside_assessment() {
        let mut app_state = AppState::new(Flow::TwoStage);
        let effects = app_state.update(Intent::ChooseDepth(Depth::Core));

        assert!(effects.is_empty());
        assert_eq!(app_state.session, Session::Idle);
    }
}

mod generation {
    use super::*;

    #[test]
    fn it_stores_results_with_depth_tag() -> Result<()> {
        let app_state = results_state(conjugations(Some(Depth::Core)))?;

        match &app_state.session {
            Session::Results(generation) => {
                assert_eq!(generation.depth(), Some(Depth::Core));
                assert_eq!(generation.verb(), "hablar");
            }
            _ => bail!("Expected results"),
        }

        return Ok(());
    }

    #[test]
    fn it_retries_failed_generation_by_reassessing() -> Result<()> {
        let mut app_state = AppState::new(Flow::TwoStage);
        app_state.update(Intent::Submit("hablar".to_string()));
        app_state.update(Intent::Backend(BackendResponse::Assessment(
            1,
            Ok(assessment()),
        )));
        app_state.update(Intent::ChooseDepth(Depth::Core));
        app_state.update(Intent::Backend(BackendResponse::Generation(
            2,
            Err(ApiError::Application("Could not parse AI response".to_string())),
        )));

        assert_eq!(
            app_state.session,
            Session::Error {
                message: "Could not parse AI response".to_string(),
                verb: Some("hablar".to_string())
            }
        );

        match single_action(app_state.update(Intent::Retry))? {
            Action::AssessVerb(id, verb) => {
                assert_eq!(id, 3);
                assert_eq!(verb, "hablar");
            }
            _ => bail!("Wrong action"),
        }

        return Ok(());
    }

    #[test]
    fn it_retries_single_stage_by_regenerating() -> Result<()> {
        let mut app_state = AppState::new(Flow::SingleStage);
        app_state.update(Intent::Submit("vivir".to_string()));
        app_state.update(Intent::Backend(BackendResponse::Generation(
            1,
            Err(ApiError::Unexpected("connection refused".to_string())),
        )));

        match single_action(app_state.update(Intent::Retry))? {
            Action::GenerateVerb(_, verb, depth) => {
                assert_eq!(verb, "vivir");
                assert_eq!(depth, None);
            }
            _ => bail!("Wrong action"),
        }

        return Ok(());
    }

    #[test]
    fn it_does_not_retry_without_a_verb() {
        let mut app_state = AppState::new(Flow::TwoStage);
        app_state.update(Intent::Submit("".to_string()));

        assert!(app_state.update(Intent::Retry).is_empty());
    }

    #[test]
    fn it_resets_on_generate_another() -> Result<()> {
        let mut app_state = results_state(conjugations(Some(Depth::Core)))?;
        let effects = app_state.update(Intent::GenerateAnother);

        assert!(matches!(effects.as_slice(), [Effect::ResetInput]));
        assert_eq!(app_state.session, Session::Idle);
        assert_eq!(app_state.save_button, SaveButton::Ready);

        return Ok(());
    }
}

mod save {
    use super::*;

    #[test]
    fn it_saves_one_verb_card_per_conjugation() -> Result<()> {
        let mut app_state = results_state(conjugations(Some(Depth::Core)))?;

        match single_action(app_state.update(Intent::Save))? {
            Action::SaveCards(save_id, SavePayload::VerbCards(cards)) => {
                assert_eq!(save_id, 1);
                assert_eq!(cards.len(), 3);
                assert_eq!(cards[1].pronoun, "tú");
                assert_eq!(cards[1].conjugated_form, "hablas");
            }
            _ => bail!("Wrong action"),
        }
        assert_eq!(app_state.save_button, SaveButton::Saving(1));

        return Ok(());
    }

    #[test]
    fn it_saves_meaning_as_sentence_card() -> Result<()> {
        let mut app_state = results_state(Generation::Meaning(MeaningCard {
            verb: "hablar".to_string(),
            english_meaning: Some("to speak".to_string()),
            example_sentence: None,
        }))?;

        match single_action(app_state.update(Intent::Save))? {
            Action::SaveCards(_, SavePayload::SentenceCards(cards)) => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].grammar_notes, "Meaning card: ");
            }
            _ => bail!("Wrong action"),
        }

        return Ok(());
    }

    #[test]
    fn it_rejects_save_without_content() -> Result<()> {
        let mut app_state = results_state(Generation::Conjugations {
            depth: Some(Depth::Core),
            data: VerbConjugations {
                verb: "hablar".to_string(),
                conjugations: Some(vec![]),
                ..VerbConjugations::default()
            },
        })?;

        assert!(app_state.update(Intent::Save).is_empty());
        assert_eq!(
            app_state.session,
            Session::Error {
                message: "No cards to save".to_string(),
                verb: Some("hablar".to_string())
            }
        );

        return Ok(());
    }

    #[test]
    fn it_ignores_save_failure_after_new_submit() -> Result<()> {
        let mut app_state = results_state(conjugations(Some(Depth::Core)))?;
        app_state.update(Intent::Save);

        let id = match single_action(app_state.update(Intent::Submit("tener".to_string())))? {
            Action::AssessVerb(id, _) => id,
            _ => bail!("Wrong action"),
        };
        assert_eq!(app_state.save_button, SaveButton::Ready);

        app_state.update(Intent::Backend(BackendResponse::Save(
            1,
            Err(ApiError::Http {
                status: 500,
                reason: "Internal Server Error".to_string(),
            }),
        )));
        assert!(app_state.session.is_loading());

        app_state.update(Intent::Backend(BackendResponse::Assessment(
            id,
            Ok(Assessment {
                verb: "tener".to_string(),
                complexity: "irregular".to_string(),
                ..Assessment::default()
            }),
        )));
        match &app_state.session {
            Session::Assessment(assessment) => assert_eq!(assessment.verb, "tener"),
            session => bail!("Unexpected session {session:?}"),
        }

        return Ok(());
    }

    #[test]
    fn it_rejects_save_before_results() {
        let mut app_state = AppState::new(Flow::TwoStage);

        assert!(app_state.update(Intent::Save).is_empty());
        assert_eq!(
            app_state.session,
            Session::Error {
                message: "No cards to save".to_string(),
                verb: None
            }
        );
        assert_eq!(app_state.save_button, SaveButton::Ready);
    }

    #[test]
    fn it_ignores_save_while_loading() {
        let mut app_state = AppState::new(Flow::TwoStage);
        app_state.update(Intent::Submit("ir".to_string()));

        assert!(app_state.update(Intent::Save).is_empty());
        assert!(app_state.session.is_loading());
    }

    #[test]
    fn it_confirms_then_reverts_after_delay() -> Result<()> {
        let mut app_state = results_state(conjugations(Some(Depth::Full)))?;
        app_state.update(Intent::Save);
        app_state.update(Intent::Backend(BackendResponse::Save(
            1,
            Ok(ApiMessage::default()),
        )));

        assert_eq!(app_state.save_button, SaveButton::Confirmed(1));
        assert!(!app_state.save_button.is_enabled());

        // Still confirming, a second save is not accepted.
        assert!(app_state.update(Intent::Save).is_empty());

        app_state.update(Intent::Backend(BackendResponse::SaveConfirmationElapsed(1)));
        assert_eq!(app_state.save_button, SaveButton::Ready);
        assert_eq!(app_state.update(Intent::Save).len(), 1);

        return Ok(());
    }

    #[test]
    fn it_ignores_stale_confirmation_ticks() -> Result<()> {
        let mut app_state = results_state(conjugations(Some(Depth::Full)))?;
        app_state.update(Intent::Save);
        app_state.update(Intent::Backend(BackendResponse::Save(
            1,
            Ok(ApiMessage::default()),
        )));
        app_state.update(Intent::Backend(BackendResponse::SaveConfirmationElapsed(1)));
        app_state.update(Intent::Save);
        app_state.update(Intent::Backend(BackendResponse::Save(
            2,
            Ok(ApiMessage::default()),
        )));

        app_state.update(Intent::Backend(BackendResponse::SaveConfirmationElapsed(1)));
        assert_eq!(app_state.save_button, SaveButton::Confirmed(2));

        return Ok(());
    }

    #[test]
    fn it_reverts_immediately_on_failure() -> Result<()> {
        let mut app_state = results_state(conjugations(Some(Depth::Core)))?;
        app_state.update(Intent::Save);
        app_state.update(Intent::Backend(BackendResponse::Save(
            1,
            Err(ApiError::Http {
                status: 500,
                reason: "Internal Server Error".to_string(),
            }),
        )));

        assert_eq!(app_state.save_button, SaveButton::Ready);
        assert_eq!(
            app_state.session,
            Session::Error {
                message: "HTTP 500: Internal Server Error".to_string(),
                verb: Some("hablar".to_string())
            }
        );

        return Ok(());
    }
}

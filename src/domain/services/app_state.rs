#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::ApiError;
use crate::domain::models::BackendResponse;
use crate::domain::models::Depth;
use crate::domain::models::Effect;
use crate::domain::models::Flow;
use crate::domain::models::Intent;
use crate::domain::models::SaveButton;
use crate::domain::models::SavePayload;
use crate::domain::models::Session;
use crate::domain::models::Stage;

/// Owner of the study session. Every transition goes through `update`, which
/// replaces the session as a whole and returns the side effects the UI loop
/// must carry out.
pub struct AppState {
    pub flow: Flow,
    pub session: Session,
    pub save_button: SaveButton,
    pub notice: Option<String>,
    pub scroll: Scroll,
    request_id: u64,
    save_id: u64,
}

impl AppState {
    pub fn new(flow: Flow) -> AppState {
        return AppState {
            flow,
            session: Session::Idle,
            save_button: SaveButton::Ready,
            notice: None,
            scroll: Scroll::default(),
            request_id: 0,
            save_id: 0,
        };
    }

    pub fn update(&mut self, intent: Intent) -> Vec<Effect> {
        let effects = match intent {
            Intent::Submit(text) => self.submit(&text),
            Intent::ChooseDepth(depth) => self.choose_depth(depth),
            Intent::Save => self.save(),
            Intent::GenerateAnother => self.generate_another(),
            Intent::Retry => self.retry(),
            Intent::Backend(res) => self.handle_backend_response(res),
        };

        tracing::debug!(
            section = ?self.session.section(),
            save_button = ?self.save_button,
            effects = effects.len(),
            "Session updated"
        );

        return effects;
    }

    pub fn submit_enabled(&self) -> bool {
        return !self.session.is_loading();
    }

    fn submit(&mut self, text: &str) -> Vec<Effect> {
        if !self.submit_enabled() {
            return vec![];
        }

        let verb = text.trim().to_lowercase();
        if verb.is_empty() {
            self.session = Session::Error {
                message: ApiError::empty_verb().to_string(),
                verb: None,
            };
            return vec![];
        }

        return self.start_flow(verb);
    }

    fn start_flow(&mut self, verb: String) -> Vec<Effect> {
        match self.flow {
            Flow::TwoStage => return self.start_request(verb, Stage::Assessing),
            Flow::SingleStage => return self.start_request(verb, Stage::Generating(None)),
        }
    }

    fn start_request(&mut self, verb: String, stage: Stage) -> Vec<Effect> {
        self.request_id += 1;
        self.scroll = Scroll::default();
        // Replies to a save from the previous session no longer apply.
        self.save_button = SaveButton::Ready;
        self.session = Session::Loading {
            verb: verb.to_string(),
            stage,
        };

        tracing::debug!(request_id = self.request_id, verb = verb.as_str(), stage = ?stage, "Starting request");

        let action = match stage {
            Stage::Assessing => Action::AssessVerb(self.request_id, verb),
            Stage::Generating(depth) => Action::GenerateVerb(self.request_id, verb, depth),
        };

        return vec![Effect::Dispatch(action)];
    }

    fn choose_depth(&mut self, depth: Depth) -> Vec<Effect> {
        if let Session::Assessment(assessment) = &self.session {
            let verb = assessment.verb.to_string();
            return self.start_request(verb, Stage::Generating(Some(depth)));
        }

        return vec![];
    }

    fn save(&mut self) -> Vec<Effect> {
        let generation = match &self.session {
            Session::Results(generation) => generation,
            Session::Loading { .. } => return vec![],
            session => {
                let verb = session.verb().map(|verb| return verb.to_string());
                self.session = Session::Error {
                    message: ApiError::nothing_to_save().to_string(),
                    verb,
                };
                return vec![];
            }
        };

        if !self.save_button.is_enabled() {
            return vec![];
        }

        let payload = match SavePayload::from_generation(generation) {
            Some(payload) => payload,
            None => {
                self.session = Session::Error {
                    message: ApiError::nothing_to_save().to_string(),
                    verb: Some(generation.verb().to_string()),
                };
                return vec![];
            }
        };

        self.save_id += 1;
        self.save_button = SaveButton::Saving(self.save_id);

        tracing::debug!(save_id = self.save_id, cards = payload.len(), "Saving cards");

        return vec![Effect::Dispatch(Action::SaveCards(self.save_id, payload))];
    }

    fn generate_another(&mut self) -> Vec<Effect> {
        if !matches!(self.session, Session::Results(_)) {
            return vec![];
        }

        self.session = Session::Idle;
        self.save_button = SaveButton::Ready;
        self.scroll = Scroll::default();

        return vec![Effect::ResetInput];
    }

    fn retry(&mut self) -> Vec<Effect> {
        if let Session::Error {
            verb: Some(verb), ..
        } = &self.session
        {
            let verb = verb.to_string();
            return self.start_flow(verb);
        }

        return vec![];
    }

    fn loading_verb(&self, request_id: u64) -> Option<String> {
        if request_id != self.request_id {
            tracing::debug!(
                request_id,
                latest_request_id = self.request_id,
                "Dropping stale response"
            );
            return None;
        }

        if let Session::Loading { verb, .. } = &self.session {
            return Some(verb.to_string());
        }

        return None;
    }

    fn handle_backend_response(&mut self, res: BackendResponse) -> Vec<Effect> {
        match res {
            BackendResponse::Assessment(request_id, res) => {
                let verb = match self.loading_verb(request_id) {
                    Some(verb) => verb,
                    None => return vec![],
                };

                match res {
                    Ok(assessment) => {
                        self.session = Session::Assessment(assessment);
                    }
                    Err(err) => {
                        tracing::error!(error = ?err, "Assessment error");
                        self.session = Session::Error {
                            message: err.message_or("Failed to assess verb"),
                            verb: Some(verb),
                        };
                    }
                }
            }
            BackendResponse::Generation(request_id, res) => {
                let verb = match self.loading_verb(request_id) {
                    Some(verb) => verb,
                    None => return vec![],
                };

                match res {
                    Ok(generation) => {
                        tracing::debug!(depth = ?generation.depth(), "Generation received");
                        self.save_button = SaveButton::Ready;
                        self.session = Session::Results(generation);
                    }
                    Err(err) => {
                        tracing::error!(error = ?err, "Generation error");
                        self.session = Session::Error {
                            message: err.message_or("Failed to generate verb content"),
                            verb: Some(verb),
                        };
                    }
                }
            }
            BackendResponse::Save(save_id, res) => {
                if self.save_button != SaveButton::Saving(save_id) {
                    return vec![];
                }

                match res {
                    Ok(_) => {
                        self.save_button = SaveButton::Confirmed(save_id);
                    }
                    Err(err) => {
                        tracing::error!(error = ?err, "Save error");
                        self.save_button = SaveButton::Ready;
                        self.session = Session::Error {
                            message: err.message_or("Failed to save cards"),
                            verb: self.session.verb().map(|verb| return verb.to_string()),
                        };
                    }
                }
            }
            BackendResponse::SaveConfirmationElapsed(save_id) => {
                if self.save_button == SaveButton::Confirmed(save_id) {
                    self.save_button = SaveButton::Ready;
                }
            }
        }

        return vec![];
    }
}

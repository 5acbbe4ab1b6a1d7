#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendResponse;
use crate::domain::models::Depth;
use crate::domain::models::Event;
use crate::domain::models::SavePayload;

async fn generate(
    backend: &BackendBox,
    request_id: u64,
    verb: &str,
    depth: Option<Depth>,
) -> BackendResponse {
    let res = match depth {
        Some(depth) => backend.generate_verb_targeted(verb, depth).await,
        None => backend.generate_verb(verb).await,
    };

    return BackendResponse::Generation(request_id, res);
}

async fn save(
    backend: &BackendBox,
    tx: &mpsc::UnboundedSender<Event>,
    save_id: u64,
    payload: SavePayload,
    confirmation_delay: Duration,
) -> Result<()> {
    let res = backend.save_cards(&payload).await;
    let saved = res.is_ok();
    tx.send(Event::BackendResponse(BackendResponse::Save(save_id, res)))?;

    if saved {
        tokio::time::sleep(confirmation_delay).await;
        tx.send(Event::BackendResponse(
            BackendResponse::SaveConfirmationElapsed(save_id),
        ))?;
    }

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs backend calls off the UI loop. A new request aborts the one in
    /// flight, and a new save aborts the pending confirmation timer.
    pub async fn start(
        backend: BackendBox,
        confirmation_delay: Duration,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let backend = Arc::new(backend);

        // Lazy defaults.
        let mut worker: JoinHandle<Result<()>> = tokio::spawn(async {
            return Ok(());
        });
        let mut saver: JoinHandle<Result<()>> = tokio::spawn(async {
            return Ok(());
        });

        while let Some(action) = rx.recv().await {
            let worker_backend = backend.clone();
            let worker_tx = tx.clone();

            match action {
                Action::AssessVerb(request_id, verb) => {
                    worker.abort();
                    worker = tokio::spawn(async move {
                        let res = worker_backend.assess_verb(&verb).await;
                        worker_tx.send(Event::BackendResponse(BackendResponse::Assessment(
                            request_id, res,
                        )))?;

                        return Ok(());
                    });
                }
                Action::GenerateVerb(request_id, verb, depth) => {
                    worker.abort();
                    worker = tokio::spawn(async move {
                        let res = generate(&worker_backend, request_id, &verb, depth).await;
                        worker_tx.send(Event::BackendResponse(res))?;

                        return Ok(());
                    });
                }
                Action::SaveCards(save_id, payload) => {
                    saver.abort();
                    saver = tokio::spawn(async move {
                        return save(
                            &worker_backend,
                            &worker_tx,
                            save_id,
                            payload,
                            confirmation_delay,
                        )
                        .await;
                    });
                }
            }
        }

        return Ok(());
    }
}

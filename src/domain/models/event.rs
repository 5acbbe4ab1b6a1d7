use tui_textarea::Input;

use super::ApiError;
use super::ApiMessage;
use super::Assessment;
use super::Depth;
use super::Generation;

#[derive(Debug)]
pub enum BackendResponse {
    Assessment(u64, Result<Assessment, ApiError>),
    Generation(u64, Result<Generation, ApiError>),
    Save(u64, Result<ApiMessage, ApiError>),
    SaveConfirmationElapsed(u64),
}

pub enum Event {
    BackendResponse(BackendResponse),
    BackendUnavailable(String),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLN(),
    KeyboardCTRLR(),
    KeyboardCTRLS(),
    KeyboardDepth(Depth),
    KeyboardEnter(),
    KeyboardPaste(String),
    UIScrollDown(),
    UIScrollUp(),
    UITick(),
}

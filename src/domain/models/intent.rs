use super::Action;
use super::BackendResponse;
use super::Depth;

/// Inputs to the session reducer.
pub enum Intent {
    Submit(String),
    ChooseDepth(Depth),
    Save,
    GenerateAnother,
    Retry,
    Backend(BackendResponse),
}

/// Outputs of the session reducer, applied by the UI loop.
#[derive(Debug)]
pub enum Effect {
    Dispatch(Action),
    ResetInput,
}

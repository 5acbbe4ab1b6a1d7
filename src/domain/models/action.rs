use super::Depth;
use super::SavePayload;

/// Work requested from the actions worker. The leading id tags the request
/// so late responses can be matched against the session that asked.
#[derive(Debug)]
pub enum Action {
    AssessVerb(u64, String),
    GenerateVerb(u64, String, Option<Depth>),
    SaveCards(u64, SavePayload),
}

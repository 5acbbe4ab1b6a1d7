#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

use thiserror::Error;

/// Every failure a study session can surface. All variants collapse into a
/// single user facing message through `Display`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Rejected locally, no request was issued.
    #[error("{0}")]
    Validation(String),
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },
    /// The backend answered successfully but carried an `error` field.
    #[error("{0}")]
    Application(String),
    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn empty_verb() -> ApiError {
        return ApiError::Validation("Please enter a verb".to_string());
    }

    pub fn nothing_to_save() -> ApiError {
        return ApiError::Validation("No cards to save".to_string());
    }

    /// Normalizes the error into the message shown in the error section,
    /// using `fallback` when the underlying message is blank.
    pub fn message_or(&self, fallback: &str) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            return fallback.to_string();
        }

        return msg;
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> ApiError {
        return ApiError::Unexpected(err.to_string());
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> ApiError {
        return ApiError::Unexpected(err.to_string());
    }
}

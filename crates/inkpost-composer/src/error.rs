use crate::record::DocumentId;

/// Message shown to the commenter when a write fails
pub const SUBMIT_FAILED_MESSAGE: &str = "留言發布失敗，請稍後再試。";

/// Content store write failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreWriteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Comment not found: {0}")]
    NotFound(DocumentId),
}

/// Why a submit did not reach or did not succeed at the store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Nothing to submit")]
    Empty,

    #[error("A submission is already in flight")]
    InFlight,

    #[error(transparent)]
    Store(#[from] StoreWriteError),
}

impl SubmitError {
    /// Text for the commenter. Local validation is silent, store failures
    /// get a generic retry message.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            SubmitError::Empty | SubmitError::InFlight => None,
            SubmitError::Store(_) => Some(SUBMIT_FAILED_MESSAGE),
        }
    }

    /// Whether resubmitting the same content can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitError::Store(StoreWriteError::Network(_)))
    }
}

use thiserror::Error;
use uuid::Uuid;

/// Errors observable at the controller boundary. Remote failures never escape as
/// anything else, and every variant is recoverable by retrying the operation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ControllerError {
    #[error("could not read {kind}: {reason}")]
    RemoteReadFailure { kind: String, reason: String },

    #[error("could not write {kind} {id}: {reason}")]
    RemoteWriteFailure {
        kind: String,
        id: String,
        reason: String,
    },

    #[error("{kind} {id} is not in the local collection")]
    NotFound { kind: String, id: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{kind} {id} already has a mutation in progress")]
    MutationInProgress { kind: String, id: String },

    #[error("confirmation {0} is unknown or already settled")]
    UnknownConfirmation(Uuid),
}

impl ControllerError {
    pub fn read(kind: &str, reason: impl ToString) -> Self {
        Self::RemoteReadFailure {
            kind: kind.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn write(kind: &str, id: impl ToString, reason: impl ToString) -> Self {
        Self::RemoteWriteFailure {
            kind: kind.to_string(),
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn not_found(kind: &str, id: impl ToString) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }

    pub fn in_progress(kind: &str, id: impl ToString) -> Self {
        Self::MutationInProgress {
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }
}

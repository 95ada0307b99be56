use thiserror::Error;

use crate::{dao::storage::StorageError, state::session::SessionError};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend is unavailable.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Application is running in degraded mode without storage.
    #[error("storage unavailable (degraded mode)")]
    Degraded,
    /// Requested category does not exist in the bank.
    #[error("category `{0}` not found")]
    CategoryNotFound(String),
    /// No quiz session is active for the user.
    #[error("no active session for user `{0}`")]
    NoSession(i64),
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A session-level rule rejected the operation.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

/// User-facing failure replies rendered verbatim by transports.
///
/// Internal detail never crosses this boundary; it stays in the logs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    /// The user acted outside a quiz.
    #[error("No quiz in progress. Please start a new quiz.")]
    StartAgain,
    /// The requested category does not exist.
    #[error("No category found. Please choose a category to start the quiz.")]
    ChooseAgain,
    /// The submitted answer was not one of the offered options.
    #[error("That option isn't available. Please try again.")]
    TryAgain,
    /// Anything the user cannot fix by retrying.
    #[error("There was an issue during the quiz. Please contact support.")]
    Apology,
}

impl From<ServiceError> for UserError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::CategoryNotFound(_) => UserError::ChooseAgain,
            ServiceError::NoSession(_) => UserError::StartAgain,
            ServiceError::InvalidInput(_) => UserError::TryAgain,
            ServiceError::Session(SessionError::AnswerOutOfRange { .. }) => UserError::TryAgain,
            ServiceError::Session(_)
            | ServiceError::Unavailable(_)
            | ServiceError::Degraded => UserError::Apology,
        }
    }
}

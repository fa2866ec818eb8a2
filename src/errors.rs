use std::fmt;

use thiserror::Error;

use crate::domain::FieldKey;
use crate::wizard::steps::PartitionError;

/// Failures while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failures reported by the persistence transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request never produced a usable response.
    #[error("Transport failure: {0}")]
    Transport(String),
    /// The service refused the credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// The service understood the request and rejected it.
    #[error("Rejected: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}

/// Coarse classification of [`SubmissionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionErrorKind {
    Network,
    ValidationRejected,
    Unauthenticated,
    Forbidden,
    IncompleteDraft,
    NotFound,
}

impl fmt::Display for SubmissionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubmissionErrorKind::Network => "NETWORK",
            SubmissionErrorKind::ValidationRejected => "VALIDATION_REJECTED",
            SubmissionErrorKind::Unauthenticated => "UNAUTHENTICATED",
            SubmissionErrorKind::Forbidden => "FORBIDDEN",
            SubmissionErrorKind::IncompleteDraft => "INCOMPLETE_DRAFT",
            SubmissionErrorKind::NotFound => "NOT_FOUND",
        };
        f.write_str(label)
    }
}

/// Why a load/create/update/delete call did not succeed. The draft is never
/// modified when one of these is returned, so the user can resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Rejected by server: {0}")]
    ValidationRejected(String),
    #[error("Not signed in: {0}")]
    Unauthenticated(String),
    #[error("Only the project owner can change this project")]
    Forbidden,
    #[error("Draft is missing required fields: {0:?}")]
    IncompleteDraft(Vec<FieldKey>),
    #[error("Project {0} not found")]
    NotFound(String),
}

impl SubmissionError {
    pub fn kind(&self) -> SubmissionErrorKind {
        match self {
            SubmissionError::Network(_) => SubmissionErrorKind::Network,
            SubmissionError::ValidationRejected(_) => SubmissionErrorKind::ValidationRejected,
            SubmissionError::Unauthenticated(_) => SubmissionErrorKind::Unauthenticated,
            SubmissionError::Forbidden => SubmissionErrorKind::Forbidden,
            SubmissionError::IncompleteDraft(_) => SubmissionErrorKind::IncompleteDraft,
            SubmissionError::NotFound(_) => SubmissionErrorKind::NotFound,
        }
    }
}

impl From<GatewayError> for SubmissionError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Transport(message) => SubmissionError::Network(message),
            GatewayError::Unauthorized(message) => SubmissionError::Unauthenticated(message),
            GatewayError::Rejected(message) => SubmissionError::ValidationRejected(message),
        }
    }
}

/// Misuse of the wizard controller or a defective step layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Invalid step layout: {0}")]
    Configuration(#[from] PartitionError),
    #[error("A submission is already in progress")]
    SubmissionInFlight,
    #[error("Project already submitted")]
    AlreadySubmitted,
    #[error("Submit is only available from the last step (currently on step {current})")]
    NotOnLastStep { current: usize },
    #[error("Step {requested} has not been reached yet")]
    StepOutOfReach { requested: usize },
    #[error("Could not open project for editing: {0}")]
    Load(SubmissionError),
}

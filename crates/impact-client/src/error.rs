use std::time::Duration;

use impact_api::ClientError;
use strum::Display;
use thiserror::Error;

/// The kind of asynchronous job that failed server side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum FailureKind {
    #[strum(to_string = "FMU import")]
    FmuImport,
    #[strum(to_string = "Project import")]
    ProjectImport,
    #[strum(to_string = "Content import")]
    ContentImport,
    #[strum(to_string = "External result upload")]
    ExternalResultImport,
    #[strum(to_string = "Result import")]
    CaseResultImport,
    #[strum(to_string = "CustomArtifact import")]
    CustomArtifactImport,
    #[strum(to_string = "Workspace import")]
    WorkspaceImport,
    #[strum(to_string = "Workspace export")]
    WorkspaceExport,
    #[strum(to_string = "Workspace conversion")]
    WorkspaceConversion,
    #[strum(to_string = "Orphan cleanup")]
    OrphanCleanup,
}

#[derive(Error, Debug)]
pub enum OperationError {
    #[error(
        "Time exceeded the set timeout - {}s! Present status of operation is {status}!",
        .timeout.as_secs_f64()
    )]
    Timeout { timeout: Duration, status: String },
    #[error(
        "The operation '{name}' has the status '{status}', it will never get the status '{requested}'!"
    )]
    UnreachableStatus {
        name: String,
        status: String,
        requested: String,
    },
    #[error("{0}")]
    NotSupported(String),
    #[error("{kind} failed! Cause: {message}")]
    Failed { kind: FailureKind, message: String },
    #[error("No custom artifact found with ID: {0}.")]
    NoSuchCustomArtifact(String),
    #[error("Unknown operation status '{value}'")]
    UnknownStatus { value: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl OperationError {
    pub(crate) fn cancel_not_supported() -> Self {
        OperationError::NotSupported("Cancel is not supported for this operation".to_string())
    }

    /// True for a wait that gave up, including a wait for a status that can
    /// never be reached.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            OperationError::Timeout { .. } | OperationError::UnreachableStatus { .. }
        )
    }

    pub fn is_not_supported(&self) -> bool {
        matches!(self, OperationError::NotSupported(_))
    }

    /// Kind of the failed server side job, if this is a job failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            OperationError::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ImpactClientError {
    #[error("Invalid endpoint '{0}'")]
    InvalidEndpoint(String),
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("Failed to reach server: {0}")]
    ServerConnectionError(String),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Operation(#[from] OperationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message() {
        let err = OperationError::Timeout {
            timeout: Duration::from_millis(1500),
            status: "RUNNING".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Time exceeded the set timeout - 1.5s! Present status of operation is RUNNING!"
        );
        assert!(err.is_timeout());
    }

    #[test]
    fn failure_message() {
        let err = OperationError::Failed {
            kind: FailureKind::FmuImport,
            message: "bad fmu".to_string(),
        };

        assert_eq!(err.to_string(), "FMU import failed! Cause: bad fmu");
        assert_eq!(err.failure_kind(), Some(FailureKind::FmuImport));
        assert!(!err.is_timeout());
    }

    #[test]
    fn unreachable_status_is_timeout() {
        let err = OperationError::UnreachableStatus {
            name: "Looking for cached FMU".to_string(),
            status: "DONE".to_string(),
            requested: "CANCELLED".to_string(),
        };

        assert!(err.is_timeout());
        assert!(err.to_string().contains("will never get the status 'CANCELLED'"));
    }
}

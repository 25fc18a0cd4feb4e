use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use impact_api::schemas::AsyncStatusResponse;
use serde::de::DeserializeOwned;

use crate::error::{FailureKind, OperationError};
use crate::operations::poller::Poller;
use crate::operations::status::{AsyncOperationStatus, Status};

/// Builds the entity an operation resolves to from the identifiers the
/// server and the operation supply.
pub type EntityFactory<A, E> = Arc<dyn Fn(A) -> E + Send + Sync>;

/// A handle on one server side job.
///
/// The server is authoritative for the job: every [`Operation::status`] call
/// is a fresh query and nothing is cached between calls.
pub trait Operation {
    type Status: Copy + PartialEq + Display;
    type Entity;

    /// The opaque job handle.
    fn id(&self) -> &str;

    /// Short label used in progress logs and error messages.
    fn name(&self) -> &'static str;

    fn status(&self) -> Result<Self::Status, OperationError>;

    /// Resolve the entity the job produced.
    fn data(&self) -> Result<Self::Entity, OperationError>;

    /// Request cancellation of the job without waiting for it to stop.
    fn cancel(&self) -> Result<(), OperationError>;
}

/// Operations tracking a compilation or an execution.
pub trait ExecutionOperation: Operation<Status = Status> {
    fn is_complete(&self) -> Result<bool, OperationError> {
        Ok(self.status()? == Status::Done)
    }

    /// Block until the job reports `status`, then return its entity.
    ///
    /// A `timeout` of `None` waits indefinitely. The wait gives up once more
    /// than `timeout` has elapsed since the call, so a zero timeout returns
    /// after the first status query unless that status is the target. The
    /// remote job keeps running when the wait times out.
    fn wait(
        &self,
        timeout: Option<Duration>,
        status: Status,
    ) -> Result<Self::Entity, OperationError> {
        self.wait_with(&Poller::default(), timeout, status)
    }

    /// [`wait`](ExecutionOperation::wait) for the job to be `DONE`.
    fn wait_done(&self, timeout: Option<Duration>) -> Result<Self::Entity, OperationError> {
        self.wait(timeout, Status::Done)
    }

    fn wait_with(
        &self,
        poller: &Poller,
        timeout: Option<Duration>,
        status: Status,
    ) -> Result<Self::Entity, OperationError> {
        poller.poll(self, timeout, |current| current == status)
    }
}

/// Operations tracking an import, export, conversion or cleanup job.
///
/// These jobs end either `READY` or `ERROR`; [`Operation::data`] fails with
/// the server supplied cause for the latter.
pub trait AsyncOperation: Operation<Status = AsyncOperationStatus> {
    fn wait(&self, timeout: Option<Duration>) -> Result<Self::Entity, OperationError> {
        self.wait_with(&Poller::default(), timeout)
    }

    fn wait_with(
        &self,
        poller: &Poller,
        timeout: Option<Duration>,
    ) -> Result<Self::Entity, OperationError> {
        poller.poll(self, timeout, AsyncOperationStatus::done)
    }
}

pub(crate) fn parse_status(value: &str) -> Result<Status, OperationError> {
    Status::from_str(value).map_err(|_| OperationError::UnknownStatus {
        value: value.to_string(),
    })
}

/// Last `/` separated segment of an import location.
pub(crate) fn location_id(location: &str) -> &str {
    location.rsplit('/').next().unwrap_or(location)
}

/// A status envelope of an asynchronous job.
#[derive(Debug)]
pub(crate) struct AsyncInfo {
    pub status: AsyncOperationStatus,
    pub response: AsyncStatusResponse,
}

impl AsyncInfo {
    pub fn parse(response: AsyncStatusResponse) -> Result<Self, OperationError> {
        let status = AsyncOperationStatus::from_str(&response.status).map_err(|_| {
            OperationError::UnknownStatus {
                value: response.status.clone(),
            }
        })?;
        Ok(Self { status, response })
    }

    /// Fail with the server supplied cause if the job ended in `ERROR`.
    pub fn ensure_succeeded(self, kind: FailureKind) -> Result<Self, OperationError> {
        if self.status == AsyncOperationStatus::Error {
            return Err(OperationError::Failed {
                kind,
                message: self.response.error_message(),
            });
        }
        Ok(self)
    }

    /// Deserialize the identifiers the server placed in the success envelope.
    pub fn success_data<T: DeserializeOwned>(&self) -> Result<T, OperationError> {
        let data = self.response.data.clone().ok_or_else(|| {
            OperationError::MalformedResponse(format!(
                "No data in job status (status: {})",
                self.status
            ))
        })?;
        serde_json::from_value(data).map_err(|e| OperationError::MalformedResponse(e.to_string()))
    }
}

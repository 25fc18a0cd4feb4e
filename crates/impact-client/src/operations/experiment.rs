use std::fmt;
use std::sync::Arc;

use derive_new::new;

use crate::error::OperationError;
use crate::operations::base::{EntityFactory, ExecutionOperation, Operation, parse_status};
use crate::operations::service::OperationService;
use crate::operations::status::Status;

#[derive(Debug, Clone, PartialEq, new)]
pub struct ExperimentArgs {
    pub workspace_id: String,
    pub exp_id: String,
}

/// Tracks the execution of an experiment.
pub struct ExperimentOperation<E> {
    workspace_id: String,
    exp_id: String,
    service: Arc<dyn OperationService>,
    create_entity: EntityFactory<ExperimentArgs, E>,
}

impl<E> ExperimentOperation<E> {
    pub fn new(
        workspace_id: impl Into<String>,
        exp_id: impl Into<String>,
        service: Arc<dyn OperationService>,
        create_entity: EntityFactory<ExperimentArgs, E>,
    ) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            exp_id: exp_id.into(),
            service,
            create_entity,
        }
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }
}

impl<E> Operation for ExperimentOperation<E> {
    type Status = Status;
    type Entity = E;

    fn id(&self) -> &str {
        &self.exp_id
    }

    fn name(&self) -> &'static str {
        "Execution"
    }

    fn status(&self) -> Result<Status, OperationError> {
        let resp = self
            .service
            .execute_status(&self.workspace_id, &self.exp_id)?;
        parse_status(&resp.status)
    }

    fn data(&self) -> Result<E, OperationError> {
        Ok((self.create_entity)(ExperimentArgs::new(
            self.workspace_id.clone(),
            self.exp_id.clone(),
        )))
    }

    fn cancel(&self) -> Result<(), OperationError> {
        self.service
            .execute_cancel(&self.workspace_id, &self.exp_id)?;
        Ok(())
    }
}

impl<E> ExecutionOperation for ExperimentOperation<E> {}

impl<E> PartialEq for ExperimentOperation<E> {
    fn eq(&self, other: &Self) -> bool {
        self.exp_id == other.exp_id
    }
}

impl<E> fmt::Display for ExperimentOperation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Experiment operation for id '{}'", self.exp_id)
    }
}

impl<E> fmt::Debug for ExperimentOperation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExperimentOperation")
            .field("workspace_id", &self.workspace_id)
            .field("exp_id", &self.exp_id)
            .finish_non_exhaustive()
    }
}

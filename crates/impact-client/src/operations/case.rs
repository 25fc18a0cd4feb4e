use std::fmt;
use std::sync::Arc;

use derive_new::new;
use serde_json::Value;

use crate::error::OperationError;
use crate::operations::base::{EntityFactory, ExecutionOperation, Operation, parse_status};
use crate::operations::service::OperationService;
use crate::operations::status::Status;

#[derive(Debug, Clone, PartialEq, new)]
pub struct CaseArgs {
    pub workspace_id: String,
    pub exp_id: String,
    pub case_id: String,
    pub info: Value,
}

/// Tracks the execution of a single case.
///
/// Cases run as part of their experiment, so status and cancellation go
/// through the experiment execution.
pub struct CaseOperation<E> {
    workspace_id: String,
    exp_id: String,
    case_id: String,
    service: Arc<dyn OperationService>,
    create_entity: EntityFactory<CaseArgs, E>,
}

impl<E> CaseOperation<E> {
    pub fn new(
        workspace_id: impl Into<String>,
        exp_id: impl Into<String>,
        case_id: impl Into<String>,
        service: Arc<dyn OperationService>,
        create_entity: EntityFactory<CaseArgs, E>,
    ) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            exp_id: exp_id.into(),
            case_id: case_id.into(),
            service,
            create_entity,
        }
    }

    pub fn experiment_id(&self) -> &str {
        &self.exp_id
    }
}

impl<E> Operation for CaseOperation<E> {
    type Status = Status;
    type Entity = E;

    fn id(&self) -> &str {
        &self.case_id
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
        let info = self
            .service
            .case_get(&self.workspace_id, &self.exp_id, &self.case_id)?;
        Ok((self.create_entity)(CaseArgs::new(
            self.workspace_id.clone(),
            self.exp_id.clone(),
            self.case_id.clone(),
            info,
        )))
    }

    fn cancel(&self) -> Result<(), OperationError> {
        self.service
            .execute_cancel(&self.workspace_id, &self.exp_id)?;
        Ok(())
    }
}

impl<E> ExecutionOperation for CaseOperation<E> {}

impl<E> PartialEq for CaseOperation<E> {
    fn eq(&self, other: &Self) -> bool {
        self.case_id == other.case_id
    }
}

impl<E> fmt::Display for CaseOperation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Case operation for id '{}'", self.case_id)
    }
}

impl<E> fmt::Debug for CaseOperation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseOperation")
            .field("workspace_id", &self.workspace_id)
            .field("exp_id", &self.exp_id)
            .field("case_id", &self.case_id)
            .finish_non_exhaustive()
    }
}

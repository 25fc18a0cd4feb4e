use std::sync::Arc;

use derive_new::new;

use crate::error::{FailureKind, OperationError};
use crate::operations::base::{AsyncInfo, AsyncOperation, EntityFactory, Operation, location_id};
use crate::operations::service::OperationService;
use crate::operations::status::AsyncOperationStatus;

#[derive(Debug, Clone, PartialEq, new)]
pub struct CaseResultArgs {
    pub workspace_id: String,
    pub exp_id: String,
    pub case_id: String,
    pub variables: Vec<String>,
}

/// Tracks the import of a result file into an existing case.
pub struct CaseResultImportOperation<E> {
    location: String,
    workspace_id: String,
    exp_id: String,
    case_id: String,
    service: Arc<dyn OperationService>,
    create_entity: EntityFactory<CaseResultArgs, E>,
}

impl<E> CaseResultImportOperation<E> {
    pub fn new(
        location: impl Into<String>,
        workspace_id: impl Into<String>,
        exp_id: impl Into<String>,
        case_id: impl Into<String>,
        service: Arc<dyn OperationService>,
        create_entity: EntityFactory<CaseResultArgs, E>,
    ) -> Self {
        Self {
            location: location.into(),
            workspace_id: workspace_id.into(),
            exp_id: exp_id.into(),
            case_id: case_id.into(),
            service,
            create_entity,
        }
    }

    fn info(&self) -> Result<AsyncInfo, OperationError> {
        AsyncInfo::parse(self.service.import_status(&self.location)?)
    }
}

impl<E> Operation for CaseResultImportOperation<E> {
    type Status = AsyncOperationStatus;
    type Entity = E;

    fn id(&self) -> &str {
        location_id(&self.location)
    }

    fn name(&self) -> &'static str {
        "Case result import"
    }

    fn status(&self) -> Result<AsyncOperationStatus, OperationError> {
        Ok(self.info()?.status)
    }

    fn data(&self) -> Result<E, OperationError> {
        self.info()?.ensure_succeeded(FailureKind::CaseResultImport)?;
        let variables = self.service.case_result_variables_get(
            &self.workspace_id,
            &self.exp_id,
            &self.case_id,
        )?;
        Ok((self.create_entity)(CaseResultArgs::new(
            self.workspace_id.clone(),
            self.exp_id.clone(),
            self.case_id.clone(),
            variables,
        )))
    }

    fn cancel(&self) -> Result<(), OperationError> {
        Err(OperationError::cancel_not_supported())
    }
}

impl<E> AsyncOperation for CaseResultImportOperation<E> {}

location_operation_traits!(CaseResultImportOperation, "Case result import");

use std::sync::Arc;

use derive_new::new;

use crate::error::{FailureKind, OperationError};
use crate::operations::base::{AsyncInfo, AsyncOperation, EntityFactory, Operation, location_id};
use crate::operations::service::OperationService;
use crate::operations::status::AsyncOperationStatus;

#[derive(Debug, Clone, PartialEq, new)]
pub struct ExternalResultArgs {
    pub result_id: String,
}

/// Tracks the upload of a result file produced outside of Impact.
pub struct ExternalResultImportOperation<E> {
    location: String,
    service: Arc<dyn OperationService>,
    create_entity: EntityFactory<ExternalResultArgs, E>,
}

impl<E> ExternalResultImportOperation<E> {
    pub fn new(
        location: impl Into<String>,
        service: Arc<dyn OperationService>,
        create_entity: EntityFactory<ExternalResultArgs, E>,
    ) -> Self {
        Self {
            location: location.into(),
            service,
            create_entity,
        }
    }

    fn info(&self) -> Result<AsyncInfo, OperationError> {
        AsyncInfo::parse(self.service.import_status(&self.location)?)
    }
}

impl<E> Operation for ExternalResultImportOperation<E> {
    type Status = AsyncOperationStatus;
    type Entity = E;

    fn id(&self) -> &str {
        location_id(&self.location)
    }

    fn name(&self) -> &'static str {
        "Result import"
    }

    fn status(&self) -> Result<AsyncOperationStatus, OperationError> {
        Ok(self.info()?.status)
    }

    fn data(&self) -> Result<E, OperationError> {
        self.info()?.ensure_succeeded(FailureKind::ExternalResultImport)?;
        let result = self.service.external_result_get(self.id())?;
        Ok((self.create_entity)(ExternalResultArgs::new(result.id)))
    }

    fn cancel(&self) -> Result<(), OperationError> {
        Err(OperationError::cancel_not_supported())
    }
}

impl<E> AsyncOperation for ExternalResultImportOperation<E> {}

location_operation_traits!(ExternalResultImportOperation, "Result import");

use std::sync::Arc;

use derive_new::new;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{FailureKind, OperationError};
use crate::operations::base::{AsyncInfo, AsyncOperation, EntityFactory, Operation, location_id};
use crate::operations::service::OperationService;
use crate::operations::status::AsyncOperationStatus;

#[derive(Debug, Clone, PartialEq, new)]
pub struct ProjectArgs {
    pub project_id: String,
    pub project_type: Option<String>,
    pub storage_location: Option<String>,
    pub definition: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectImportData {
    project_id: String,
}

/// Tracks the import of a project archive.
pub struct ProjectImportOperation<E> {
    location: String,
    service: Arc<dyn OperationService>,
    create_entity: EntityFactory<ProjectArgs, E>,
}

impl<E> ProjectImportOperation<E> {
    pub fn new(
        location: impl Into<String>,
        service: Arc<dyn OperationService>,
        create_entity: EntityFactory<ProjectArgs, E>,
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

impl<E> Operation for ProjectImportOperation<E> {
    type Status = AsyncOperationStatus;
    type Entity = E;

    fn id(&self) -> &str {
        location_id(&self.location)
    }

    fn name(&self) -> &'static str {
        "Project import"
    }

    fn status(&self) -> Result<AsyncOperationStatus, OperationError> {
        Ok(self.info()?.status)
    }

    fn data(&self) -> Result<E, OperationError> {
        let info = self.info()?.ensure_succeeded(FailureKind::ProjectImport)?;
        let data: ProjectImportData = info.success_data()?;
        let project = self.service.project_get(&data.project_id)?;
        Ok((self.create_entity)(ProjectArgs::new(
            project.id,
            project.project_type,
            project.storage_location,
            project.definition,
        )))
    }

    fn cancel(&self) -> Result<(), OperationError> {
        Err(OperationError::cancel_not_supported())
    }
}

impl<E> AsyncOperation for ProjectImportOperation<E> {}

location_operation_traits!(ProjectImportOperation, "Project import");

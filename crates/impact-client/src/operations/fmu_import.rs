use std::sync::Arc;

use derive_new::new;
use serde::Deserialize;

use crate::error::{FailureKind, OperationError};
use crate::operations::base::{AsyncInfo, AsyncOperation, EntityFactory, Operation, location_id};
use crate::operations::service::OperationService;
use crate::operations::status::AsyncOperationStatus;

/// Identifiers of a model created by an FMU import.
#[derive(Debug, Clone, PartialEq, new)]
pub struct ModelArgs {
    pub class_name: String,
    pub workspace_id: String,
    pub project_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FmuImportData {
    fmu_class_path: String,
}

/// Tracks the import of an FMU into a project as a model.
pub struct FmuImportOperation<E> {
    location: String,
    workspace_id: String,
    project_id: String,
    service: Arc<dyn OperationService>,
    create_entity: EntityFactory<ModelArgs, E>,
}

impl<E> FmuImportOperation<E> {
    pub fn new(
        location: impl Into<String>,
        workspace_id: impl Into<String>,
        project_id: impl Into<String>,
        service: Arc<dyn OperationService>,
        create_entity: EntityFactory<ModelArgs, E>,
    ) -> Self {
        Self {
            location: location.into(),
            workspace_id: workspace_id.into(),
            project_id: project_id.into(),
            service,
            create_entity,
        }
    }

    fn info(&self) -> Result<AsyncInfo, OperationError> {
        AsyncInfo::parse(self.service.import_status(&self.location)?)
    }
}

impl<E> Operation for FmuImportOperation<E> {
    type Status = AsyncOperationStatus;
    type Entity = E;

    fn id(&self) -> &str {
        location_id(&self.location)
    }

    fn name(&self) -> &'static str {
        "Model import"
    }

    fn status(&self) -> Result<AsyncOperationStatus, OperationError> {
        Ok(self.info()?.status)
    }

    fn data(&self) -> Result<E, OperationError> {
        let info = self.info()?.ensure_succeeded(FailureKind::FmuImport)?;
        if !info.response.import_warnings.is_empty() {
            log::warn!(
                "Import Warnings: {}",
                info.response.import_warnings.join(". ")
            );
        }

        let data: FmuImportData = info.success_data()?;
        Ok((self.create_entity)(ModelArgs::new(
            data.fmu_class_path,
            self.workspace_id.clone(),
            self.project_id.clone(),
        )))
    }

    fn cancel(&self) -> Result<(), OperationError> {
        Err(OperationError::cancel_not_supported())
    }
}

impl<E> AsyncOperation for FmuImportOperation<E> {}

location_operation_traits!(FmuImportOperation, "FMU import");

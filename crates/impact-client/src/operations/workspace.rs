use std::sync::Arc;

use derive_new::new;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{FailureKind, OperationError};
use crate::operations::base::{AsyncInfo, AsyncOperation, EntityFactory, Operation, location_id};
use crate::operations::service::OperationService;
use crate::operations::status::AsyncOperationStatus;

#[derive(Debug, Clone, PartialEq, new)]
pub struct WorkspaceArgs {
    pub workspace_id: String,
    pub definition: Value,
}

/// Where a finished export can be downloaded from.
#[derive(Clone, new)]
pub struct ExportArgs {
    pub download_uri: String,
    pub service: Arc<dyn OperationService>,
}

impl std::fmt::Debug for ExportArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportArgs")
            .field("download_uri", &self.download_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkspaceData {
    workspace_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportData {
    download_uri: String,
}

fn resolve_workspace<E>(
    service: &dyn OperationService,
    info: &AsyncInfo,
    create_entity: &EntityFactory<WorkspaceArgs, E>,
) -> Result<E, OperationError> {
    let data: WorkspaceData = info.success_data()?;
    let workspace = service.workspace_get(&data.workspace_id)?;
    Ok(create_entity(WorkspaceArgs::new(
        workspace.id,
        workspace.definition,
    )))
}

/// Tracks the import of a workspace archive.
pub struct WorkspaceImportOperation<E> {
    location: String,
    service: Arc<dyn OperationService>,
    create_entity: EntityFactory<WorkspaceArgs, E>,
}

impl<E> WorkspaceImportOperation<E> {
    pub fn new(
        location: impl Into<String>,
        service: Arc<dyn OperationService>,
        create_entity: EntityFactory<WorkspaceArgs, E>,
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

impl<E> Operation for WorkspaceImportOperation<E> {
    type Status = AsyncOperationStatus;
    type Entity = E;

    fn id(&self) -> &str {
        location_id(&self.location)
    }

    fn name(&self) -> &'static str {
        "Workspace import"
    }

    fn status(&self) -> Result<AsyncOperationStatus, OperationError> {
        Ok(self.info()?.status)
    }

    fn data(&self) -> Result<E, OperationError> {
        let info = self.info()?.ensure_succeeded(FailureKind::WorkspaceImport)?;
        resolve_workspace(self.service.as_ref(), &info, &self.create_entity)
    }

    fn cancel(&self) -> Result<(), OperationError> {
        Err(OperationError::cancel_not_supported())
    }
}

impl<E> AsyncOperation for WorkspaceImportOperation<E> {}

location_operation_traits!(WorkspaceImportOperation, "Workspace import");

/// Tracks the packaging of a workspace into a downloadable archive.
pub struct WorkspaceExportOperation<E> {
    location: String,
    service: Arc<dyn OperationService>,
    create_entity: EntityFactory<ExportArgs, E>,
}

impl<E> WorkspaceExportOperation<E> {
    pub fn new(
        location: impl Into<String>,
        service: Arc<dyn OperationService>,
        create_entity: EntityFactory<ExportArgs, E>,
    ) -> Self {
        Self {
            location: location.into(),
            service,
            create_entity,
        }
    }

    fn info(&self) -> Result<AsyncInfo, OperationError> {
        AsyncInfo::parse(self.service.export_status(&self.location)?)
    }
}

impl<E> Operation for WorkspaceExportOperation<E> {
    type Status = AsyncOperationStatus;
    type Entity = E;

    fn id(&self) -> &str {
        location_id(&self.location)
    }

    fn name(&self) -> &'static str {
        "Workspace export"
    }

    fn status(&self) -> Result<AsyncOperationStatus, OperationError> {
        Ok(self.info()?.status)
    }

    fn data(&self) -> Result<E, OperationError> {
        let info = self.info()?.ensure_succeeded(FailureKind::WorkspaceExport)?;
        let data: ExportData = info.success_data()?;
        Ok((self.create_entity)(ExportArgs::new(
            data.download_uri,
            self.service.clone(),
        )))
    }

    fn cancel(&self) -> Result<(), OperationError> {
        Err(OperationError::cancel_not_supported())
    }
}

impl<E> AsyncOperation for WorkspaceExportOperation<E> {}

location_operation_traits!(WorkspaceExportOperation, "Workspace export");

/// Tracks the conversion of a workspace to the running server version.
pub struct WorkspaceConversionOperation<E> {
    location: String,
    service: Arc<dyn OperationService>,
    create_entity: EntityFactory<WorkspaceArgs, E>,
}

impl<E> WorkspaceConversionOperation<E> {
    pub fn new(
        location: impl Into<String>,
        service: Arc<dyn OperationService>,
        create_entity: EntityFactory<WorkspaceArgs, E>,
    ) -> Self {
        Self {
            location: location.into(),
            service,
            create_entity,
        }
    }

    fn info(&self) -> Result<AsyncInfo, OperationError> {
        AsyncInfo::parse(self.service.workspace_conversion_status(&self.location)?)
    }
}

impl<E> Operation for WorkspaceConversionOperation<E> {
    type Status = AsyncOperationStatus;
    type Entity = E;

    fn id(&self) -> &str {
        location_id(&self.location)
    }

    fn name(&self) -> &'static str {
        "Workspace conversion"
    }

    fn status(&self) -> Result<AsyncOperationStatus, OperationError> {
        Ok(self.info()?.status)
    }

    fn data(&self) -> Result<E, OperationError> {
        let info = self
            .info()?
            .ensure_succeeded(FailureKind::WorkspaceConversion)?;
        resolve_workspace(self.service.as_ref(), &info, &self.create_entity)
    }

    fn cancel(&self) -> Result<(), OperationError> {
        Err(OperationError::cancel_not_supported())
    }
}

impl<E> AsyncOperation for WorkspaceConversionOperation<E> {}

location_operation_traits!(WorkspaceConversionOperation, "Workspace conversion");

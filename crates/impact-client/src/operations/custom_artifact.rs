use std::sync::Arc;

use derive_new::new;
use serde::Deserialize;

use crate::error::{FailureKind, OperationError};
use crate::operations::base::{AsyncInfo, AsyncOperation, EntityFactory, Operation, location_id};
use crate::operations::service::OperationService;
use crate::operations::status::AsyncOperationStatus;

#[derive(Debug, Clone, PartialEq, new)]
pub struct CustomArtifactArgs {
    pub workspace_id: String,
    pub exp_id: String,
    pub case_id: String,
    pub artifact_id: String,
    pub download_as: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomArtifactImportData {
    artifact_id: String,
}

/// Tracks the import of a custom artifact into a case.
pub struct CustomArtifactImportOperation<E> {
    location: String,
    workspace_id: String,
    exp_id: String,
    case_id: String,
    service: Arc<dyn OperationService>,
    create_entity: EntityFactory<CustomArtifactArgs, E>,
}

impl<E> CustomArtifactImportOperation<E> {
    pub fn new(
        location: impl Into<String>,
        workspace_id: impl Into<String>,
        exp_id: impl Into<String>,
        case_id: impl Into<String>,
        service: Arc<dyn OperationService>,
        create_entity: EntityFactory<CustomArtifactArgs, E>,
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

    /// File name the artifact downloads as, from the case artifact listing.
    fn artifact_download_name(&self, artifact_id: &str) -> Result<String, OperationError> {
        self.service
            .case_artifacts_meta_get(&self.workspace_id, &self.exp_id, &self.case_id)?
            .into_iter()
            .find(|meta| meta.id == artifact_id)
            .map(|meta| meta.download_as)
            .ok_or_else(|| OperationError::NoSuchCustomArtifact(artifact_id.to_string()))
    }
}

impl<E> Operation for CustomArtifactImportOperation<E> {
    type Status = AsyncOperationStatus;
    type Entity = E;

    fn id(&self) -> &str {
        location_id(&self.location)
    }

    fn name(&self) -> &'static str {
        "Custom artifact import"
    }

    fn status(&self) -> Result<AsyncOperationStatus, OperationError> {
        Ok(self.info()?.status)
    }

    fn data(&self) -> Result<E, OperationError> {
        let info = self
            .info()?
            .ensure_succeeded(FailureKind::CustomArtifactImport)?;
        let data: CustomArtifactImportData = info.success_data()?;
        let download_as = self.artifact_download_name(&data.artifact_id)?;
        Ok((self.create_entity)(CustomArtifactArgs::new(
            self.workspace_id.clone(),
            self.exp_id.clone(),
            self.case_id.clone(),
            data.artifact_id,
            download_as,
        )))
    }

    fn cancel(&self) -> Result<(), OperationError> {
        Err(OperationError::cancel_not_supported())
    }
}

impl<E> AsyncOperation for CustomArtifactImportOperation<E> {}

location_operation_traits!(CustomArtifactImportOperation, "Custom artifact import");

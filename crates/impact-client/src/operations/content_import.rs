use std::sync::Arc;

use derive_new::new;
use impact_api::schemas::ProjectContentResponse;
use serde::Deserialize;

use crate::error::{FailureKind, OperationError};
use crate::operations::base::{AsyncInfo, AsyncOperation, EntityFactory, Operation, location_id};
use crate::operations::service::OperationService;
use crate::operations::status::AsyncOperationStatus;

#[derive(Debug, Clone, new)]
pub struct ProjectContentArgs {
    pub project_id: String,
    pub content: ProjectContentResponse,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentImportData {
    content_id: String,
}

/// Tracks the import of content (a library, a model file) into a project.
///
/// The location has the form `api/projects/{project}/content-imports/{id}`.
pub struct ContentImportOperation<E> {
    location: String,
    service: Arc<dyn OperationService>,
    create_entity: EntityFactory<ProjectContentArgs, E>,
}

impl<E> ContentImportOperation<E> {
    pub fn new(
        location: impl Into<String>,
        service: Arc<dyn OperationService>,
        create_entity: EntityFactory<ProjectContentArgs, E>,
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

    fn project_id(&self) -> Result<&str, OperationError> {
        self.location.rsplit('/').nth(2).ok_or_else(|| {
            OperationError::MalformedResponse(format!(
                "No project in content import location '{}'",
                self.location
            ))
        })
    }
}

impl<E> Operation for ContentImportOperation<E> {
    type Status = AsyncOperationStatus;
    type Entity = E;

    fn id(&self) -> &str {
        location_id(&self.location)
    }

    fn name(&self) -> &'static str {
        "Project content import"
    }

    fn status(&self) -> Result<AsyncOperationStatus, OperationError> {
        Ok(self.info()?.status)
    }

    fn data(&self) -> Result<E, OperationError> {
        let info = self.info()?.ensure_succeeded(FailureKind::ContentImport)?;
        let data: ContentImportData = info.success_data()?;
        let project_id = self.project_id()?;
        let content = self
            .service
            .project_content_get(project_id, &data.content_id)?;
        Ok((self.create_entity)(ProjectContentArgs::new(
            project_id.to_string(),
            content,
        )))
    }

    fn cancel(&self) -> Result<(), OperationError> {
        Err(OperationError::cancel_not_supported())
    }
}

impl<E> AsyncOperation for ContentImportOperation<E> {}

location_operation_traits!(ContentImportOperation, "Content import");

use std::sync::Arc;

use serde::Deserialize;

use crate::error::{FailureKind, OperationError};
use crate::operations::base::{AsyncInfo, AsyncOperation, Operation, location_id};
use crate::operations::service::OperationService;
use crate::operations::status::AsyncOperationStatus;

#[derive(Deserialize)]
struct CleanupData {
    #[serde(default)]
    orphans: Vec<String>,
}

/// Tracks the removal of workspace resources no longer referenced by
/// anything. Resolves to the ids of the removed resources.
pub struct OrphanCleanupOperation {
    location: String,
    service: Arc<dyn OperationService>,
}

impl OrphanCleanupOperation {
    pub fn new(location: impl Into<String>, service: Arc<dyn OperationService>) -> Self {
        Self {
            location: location.into(),
            service,
        }
    }

    fn info(&self) -> Result<AsyncInfo, OperationError> {
        AsyncInfo::parse(self.service.import_status(&self.location)?)
    }
}

impl Operation for OrphanCleanupOperation {
    type Status = AsyncOperationStatus;
    type Entity = Vec<String>;

    fn id(&self) -> &str {
        location_id(&self.location)
    }

    fn name(&self) -> &'static str {
        "Orphan cleanup"
    }

    fn status(&self) -> Result<AsyncOperationStatus, OperationError> {
        Ok(self.info()?.status)
    }

    fn data(&self) -> Result<Vec<String>, OperationError> {
        let info = self.info()?.ensure_succeeded(FailureKind::OrphanCleanup)?;
        if info.response.data.is_none() {
            return Ok(Vec::new());
        }
        let data: CleanupData = info.success_data()?;
        Ok(data.orphans)
    }

    fn cancel(&self) -> Result<(), OperationError> {
        Err(OperationError::cancel_not_supported())
    }
}

impl AsyncOperation for OrphanCleanupOperation {}

location_operation_traits!(@plain OrphanCleanupOperation, "Orphan cleanup");

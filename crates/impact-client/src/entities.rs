//! Resources that operations resolve to.
//!
//! These only hold the identifiers needed to address the resource on the
//! server. They are what [`ImpactClient`](crate::ImpactClient) builds when
//! an operation completes; callers with their own types supply their own
//! [`EntityFactory`](crate::operations::EntityFactory) instead.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use impact_api::schemas::ProjectContentResponse;
use serde_json::Value;

use crate::error::OperationError;
use crate::operations::{
    CaseArgs, CaseResultArgs, CustomArtifactArgs, ExperimentArgs, ExportArgs, ExternalResultArgs,
    ModelArgs, ModelExecutableArgs, OperationService, ProjectArgs, ProjectContentArgs,
    WorkspaceArgs,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub id: String,
    pub definition: Value,
}

impl From<WorkspaceArgs> for Workspace {
    fn from(args: WorkspaceArgs) -> Self {
        Self {
            id: args.workspace_id,
            definition: args.definition,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub project_type: Option<String>,
    pub storage_location: Option<String>,
    pub definition: Value,
}

impl From<ProjectArgs> for Project {
    fn from(args: ProjectArgs) -> Self {
        Self {
            id: args.project_id,
            project_type: args.project_type,
            storage_location: args.storage_location,
            definition: args.definition,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectContent {
    pub id: String,
    pub project_id: String,
    pub relpath: Option<String>,
    pub content_type: Option<String>,
    pub name: Option<String>,
    pub default_disabled: bool,
}

impl From<ProjectContentArgs> for ProjectContent {
    fn from(args: ProjectContentArgs) -> Self {
        let ProjectContentResponse {
            id,
            relpath,
            content_type,
            name,
            default_disabled,
        } = args.content;
        Self {
            id,
            project_id: args.project_id,
            relpath,
            content_type,
            name,
            default_disabled,
        }
    }
}

/// A Modelica class imported into a project.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    pub workspace_id: String,
    pub project_id: String,
}

impl From<ModelArgs> for Model {
    fn from(args: ModelArgs) -> Self {
        Self {
            name: args.class_name,
            workspace_id: args.workspace_id,
            project_id: args.project_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelExecutable {
    pub id: String,
    pub workspace_id: String,
    pub info: Option<Value>,
    pub modifiers: Option<Value>,
}

impl From<ModelExecutableArgs> for ModelExecutable {
    fn from(args: ModelExecutableArgs) -> Self {
        Self {
            id: args.fmu_id,
            workspace_id: args.workspace_id,
            info: args.info,
            modifiers: args.modifiers,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    pub id: String,
    pub workspace_id: String,
}

impl From<ExperimentArgs> for Experiment {
    fn from(args: ExperimentArgs) -> Self {
        Self {
            id: args.exp_id,
            workspace_id: args.workspace_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub id: String,
    pub workspace_id: String,
    pub experiment_id: String,
    pub info: Value,
}

impl From<CaseArgs> for Case {
    fn from(args: CaseArgs) -> Self {
        Self {
            id: args.case_id,
            workspace_id: args.workspace_id,
            experiment_id: args.exp_id,
            info: args.info,
        }
    }
}

/// Result of a case, addressed through the case it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseResult {
    pub case_id: String,
    pub workspace_id: String,
    pub experiment_id: String,
    pub variables: Vec<String>,
}

impl From<CaseResultArgs> for CaseResult {
    fn from(args: CaseResultArgs) -> Self {
        Self {
            case_id: args.case_id,
            workspace_id: args.workspace_id,
            experiment_id: args.exp_id,
            variables: args.variables,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalResult {
    pub id: String,
}

impl From<ExternalResultArgs> for ExternalResult {
    fn from(args: ExternalResultArgs) -> Self {
        Self { id: args.result_id }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomArtifact {
    pub id: String,
    pub workspace_id: String,
    pub experiment_id: String,
    pub case_id: String,
    pub download_as: String,
}

impl From<CustomArtifactArgs> for CustomArtifact {
    fn from(args: CustomArtifactArgs) -> Self {
        Self {
            id: args.artifact_id,
            workspace_id: args.workspace_id,
            experiment_id: args.exp_id,
            case_id: args.case_id,
            download_as: args.download_as,
        }
    }
}

/// A finished workspace export, ready to be downloaded.
#[derive(Clone)]
pub struct Export {
    download_uri: String,
    service: Arc<dyn OperationService>,
}

impl Export {
    /// The export id, last segment of the download uri.
    pub fn id(&self) -> &str {
        self.download_uri
            .rsplit('/')
            .next()
            .unwrap_or(&self.download_uri)
    }

    pub fn download_uri(&self) -> &str {
        &self.download_uri
    }

    /// Download the archive to `path`, creating missing parent directories.
    pub fn download_as(&self, path: impl AsRef<Path>) -> Result<PathBuf, OperationError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let bytes = self.service.export_download(&self.download_uri)?;
        std::fs::write(path, bytes)?;
        log::debug!("Export {} written to {}", self.id(), path.display());

        Ok(path.to_path_buf())
    }
}

impl From<ExportArgs> for Export {
    fn from(args: ExportArgs) -> Self {
        Self {
            download_uri: args.download_uri,
            service: args.service,
        }
    }
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Export")
            .field("download_uri", &self.download_uri)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Export {
    fn eq(&self, other: &Self) -> bool {
        self.download_uri == other.download_uri
    }
}

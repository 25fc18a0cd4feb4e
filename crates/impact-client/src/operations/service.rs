//! The transport seam the operations poll through.

use impact_api::Client;
use impact_api::ClientError;
use impact_api::schemas::{
    ArtifactMetaResponse, AsyncStatusResponse, ExecutionStatusResponse, ExternalResultResponse,
    FmuSetupRequest, FmuSetupResponse, ProjectContentResponse, ProjectResponse,
    WorkspaceResponse,
};

/// Status queries, cancel requests and resource fetches needed by the
/// operations. Implemented by [`impact_api::Client`].
pub trait OperationService: Send + Sync {
    fn fmu_setup(
        &self,
        workspace_id: &str,
        body: &FmuSetupRequest,
        get_cached: bool,
    ) -> Result<FmuSetupResponse, ClientError>;

    fn compile_model(&self, workspace_id: &str, fmu_id: &str) -> Result<(), ClientError>;

    fn compile_status(
        &self,
        workspace_id: &str,
        fmu_id: &str,
    ) -> Result<ExecutionStatusResponse, ClientError>;

    fn compile_cancel(&self, workspace_id: &str, fmu_id: &str) -> Result<(), ClientError>;

    fn execute_status(
        &self,
        workspace_id: &str,
        exp_id: &str,
    ) -> Result<ExecutionStatusResponse, ClientError>;

    fn execute_cancel(&self, workspace_id: &str, exp_id: &str) -> Result<(), ClientError>;

    fn case_get(
        &self,
        workspace_id: &str,
        exp_id: &str,
        case_id: &str,
    ) -> Result<serde_json::Value, ClientError>;

    fn case_result_variables_get(
        &self,
        workspace_id: &str,
        exp_id: &str,
        case_id: &str,
    ) -> Result<Vec<String>, ClientError>;

    fn case_artifacts_meta_get(
        &self,
        workspace_id: &str,
        exp_id: &str,
        case_id: &str,
    ) -> Result<Vec<ArtifactMetaResponse>, ClientError>;

    fn import_status(&self, location: &str) -> Result<AsyncStatusResponse, ClientError>;

    fn export_status(&self, location: &str) -> Result<AsyncStatusResponse, ClientError>;

    fn workspace_conversion_status(
        &self,
        location: &str,
    ) -> Result<AsyncStatusResponse, ClientError>;

    fn export_download(&self, download_uri: &str) -> Result<Vec<u8>, ClientError>;

    fn project_get(&self, project_id: &str) -> Result<ProjectResponse, ClientError>;

    fn project_content_get(
        &self,
        project_id: &str,
        content_id: &str,
    ) -> Result<ProjectContentResponse, ClientError>;

    fn workspace_get(&self, workspace_id: &str) -> Result<WorkspaceResponse, ClientError>;

    fn external_result_get(&self, result_id: &str)
    -> Result<ExternalResultResponse, ClientError>;
}

impl OperationService for Client {
    fn fmu_setup(
        &self,
        workspace_id: &str,
        body: &FmuSetupRequest,
        get_cached: bool,
    ) -> Result<FmuSetupResponse, ClientError> {
        Client::fmu_setup(self, workspace_id, body, get_cached)
    }

    fn compile_model(&self, workspace_id: &str, fmu_id: &str) -> Result<(), ClientError> {
        Client::compile_model(self, workspace_id, fmu_id)
    }

    fn compile_status(
        &self,
        workspace_id: &str,
        fmu_id: &str,
    ) -> Result<ExecutionStatusResponse, ClientError> {
        Client::compile_status(self, workspace_id, fmu_id)
    }

    fn compile_cancel(&self, workspace_id: &str, fmu_id: &str) -> Result<(), ClientError> {
        Client::compile_cancel(self, workspace_id, fmu_id)
    }

    fn execute_status(
        &self,
        workspace_id: &str,
        exp_id: &str,
    ) -> Result<ExecutionStatusResponse, ClientError> {
        Client::execute_status(self, workspace_id, exp_id)
    }

    fn execute_cancel(&self, workspace_id: &str, exp_id: &str) -> Result<(), ClientError> {
        Client::execute_cancel(self, workspace_id, exp_id)
    }

    fn case_get(
        &self,
        workspace_id: &str,
        exp_id: &str,
        case_id: &str,
    ) -> Result<serde_json::Value, ClientError> {
        Client::case_get(self, workspace_id, exp_id, case_id)
    }

    fn case_result_variables_get(
        &self,
        workspace_id: &str,
        exp_id: &str,
        case_id: &str,
    ) -> Result<Vec<String>, ClientError> {
        Client::case_result_variables_get(self, workspace_id, exp_id, case_id)
    }

    fn case_artifacts_meta_get(
        &self,
        workspace_id: &str,
        exp_id: &str,
        case_id: &str,
    ) -> Result<Vec<ArtifactMetaResponse>, ClientError> {
        Client::case_artifacts_meta_get(self, workspace_id, exp_id, case_id)
    }

    fn import_status(&self, location: &str) -> Result<AsyncStatusResponse, ClientError> {
        Client::import_status(self, location)
    }

    fn export_status(&self, location: &str) -> Result<AsyncStatusResponse, ClientError> {
        Client::export_status(self, location)
    }

    fn workspace_conversion_status(
        &self,
        location: &str,
    ) -> Result<AsyncStatusResponse, ClientError> {
        Client::workspace_conversion_status(self, location)
    }

    fn export_download(&self, download_uri: &str) -> Result<Vec<u8>, ClientError> {
        Client::export_download(self, download_uri)
    }

    fn project_get(&self, project_id: &str) -> Result<ProjectResponse, ClientError> {
        Client::project_get(self, project_id)
    }

    fn project_content_get(
        &self,
        project_id: &str,
        content_id: &str,
    ) -> Result<ProjectContentResponse, ClientError> {
        Client::project_content_get(self, project_id, content_id)
    }

    fn workspace_get(&self, workspace_id: &str) -> Result<WorkspaceResponse, ClientError> {
        Client::workspace_get(self, workspace_id)
    }

    fn external_result_get(
        &self,
        result_id: &str,
    ) -> Result<ExternalResultResponse, ClientError> {
        Client::external_result_get(self, result_id)
    }
}

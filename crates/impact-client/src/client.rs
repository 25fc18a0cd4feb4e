use std::sync::Arc;
use std::thread;

use impact_api::schemas::{CompilationInput, ExperimentExecuteRequest};
use impact_api::{Client, ClientError, Url};
use serde_json::Value;

use crate::config::ImpactClientConfig;
use crate::entities::{
    Case, CaseResult, CustomArtifact, Experiment, Export, ExternalResult, Model, ModelExecutable,
    Project, ProjectContent, Workspace,
};
use crate::error::{ImpactClientError, OperationError};
use crate::operations::{
    CachedModelExecutableOperation, CaseOperation, CaseResultImportOperation, Compilation,
    ContentImportOperation, CustomArtifactImportOperation, EntityFactory, ExperimentOperation,
    ExternalResultImportOperation, FmuImportOperation, ModelExecutableOperation,
    OperationService, OrphanCleanupOperation, ProjectImportOperation,
    WorkspaceConversionOperation, WorkspaceExportOperation, WorkspaceImportOperation,
};

fn factory<A: 'static, E: From<A> + 'static>() -> EntityFactory<A, E> {
    Arc::new(E::from)
}

/// The ImpactClient is the entry point to an Impact server. It holds the
/// logged in session and hands out operations tracking server side jobs.
#[derive(Debug, Clone)]
pub struct ImpactClient {
    config: ImpactClientConfig,
    api: Arc<Client>,
}

impl ImpactClient {
    /// Create a new ImpactClient with the given configuration.
    ///
    /// Logging in is retried `num_retries` times, except when the server
    /// rejects the credentials.
    pub fn create(config: ImpactClientConfig) -> Result<ImpactClient, ImpactClientError> {
        let url: Url = config
            .endpoint
            .parse()
            .map_err(|_| ImpactClientError::InvalidEndpoint(config.endpoint.clone()))?;

        for i in 0..=config.num_retries {
            let res = match &config.credentials {
                Some(creds) => Client::new(url.clone(), creds),
                None => Client::new_anonymous(url.clone()),
            };

            match res {
                Ok(api) => {
                    log::debug!("Logged in to {}", config.endpoint);
                    return Ok(ImpactClient {
                        config,
                        api: Arc::new(api),
                    });
                }
                Err(e) if e.is_login_error() => {
                    return Err(ImpactClientError::InvalidCredentials(e.to_string()));
                }
                Err(e) => {
                    if i == config.num_retries {
                        return Err(ImpactClientError::ServerConnectionError(e.to_string()));
                    }
                    log::warn!(
                        "Failed to connect to the server: {e}. Retrying in {} seconds...",
                        config.retry_interval
                    );
                    thread::sleep(config.retry_interval());
                }
            }
        }

        Err(ImpactClientError::ServerConnectionError(
            "Server timeout".to_string(),
        ))
    }

    pub fn config(&self) -> &ImpactClientConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn api(&self) -> &Client {
        &self.api
    }

    fn service(&self) -> Arc<dyn OperationService> {
        self.api.clone()
    }

    /// Compile a model, reusing an executable the server has cached for the
    /// same input unless `force_compilation` is set.
    pub fn compile(
        &self,
        workspace_id: &str,
        input: CompilationInput,
        force_compilation: bool,
    ) -> Result<Compilation<ModelExecutable>, OperationError> {
        Compilation::start(
            self.service(),
            workspace_id,
            input,
            force_compilation,
            factory(),
        )
    }

    /// Start executing every case of an experiment and track the execution.
    pub fn execute(
        &self,
        workspace_id: &str,
        exp_id: &str,
    ) -> Result<ExperimentOperation<Experiment>, ClientError> {
        self.api
            .experiment_execute(workspace_id, exp_id, &ExperimentExecuteRequest::default())?;
        Ok(self.experiment_operation(workspace_id, exp_id))
    }

    /// Start executing a single case and track it.
    pub fn execute_case(
        &self,
        workspace_id: &str,
        exp_id: &str,
        case_id: &str,
    ) -> Result<CaseOperation<Case>, ClientError> {
        self.api.experiment_execute(
            workspace_id,
            exp_id,
            &ExperimentExecuteRequest::with_cases(vec![case_id.to_string()]),
        )?;
        Ok(self.case_operation(workspace_id, exp_id, case_id))
    }

    pub fn model_executable_operation(
        &self,
        workspace_id: &str,
        fmu_id: &str,
    ) -> ModelExecutableOperation<ModelExecutable> {
        ModelExecutableOperation::new(workspace_id, fmu_id, self.service(), factory())
    }

    /// An already completed compilation of a cached executable.
    pub fn cached_model_executable_operation(
        &self,
        workspace_id: &str,
        fmu_id: &str,
        info: Option<Value>,
        modifiers: Option<Value>,
    ) -> CachedModelExecutableOperation<ModelExecutable> {
        CachedModelExecutableOperation::new(workspace_id, fmu_id, info, modifiers, factory())
    }

    pub fn experiment_operation(
        &self,
        workspace_id: &str,
        exp_id: &str,
    ) -> ExperimentOperation<Experiment> {
        ExperimentOperation::new(workspace_id, exp_id, self.service(), factory())
    }

    pub fn case_operation(
        &self,
        workspace_id: &str,
        exp_id: &str,
        case_id: &str,
    ) -> CaseOperation<Case> {
        CaseOperation::new(workspace_id, exp_id, case_id, self.service(), factory())
    }

    pub fn fmu_import_operation(
        &self,
        location: &str,
        workspace_id: &str,
        project_id: &str,
    ) -> FmuImportOperation<Model> {
        FmuImportOperation::new(location, workspace_id, project_id, self.service(), factory())
    }

    pub fn project_import_operation(&self, location: &str) -> ProjectImportOperation<Project> {
        ProjectImportOperation::new(location, self.service(), factory())
    }

    pub fn content_import_operation(
        &self,
        location: &str,
    ) -> ContentImportOperation<ProjectContent> {
        ContentImportOperation::new(location, self.service(), factory())
    }

    pub fn external_result_import_operation(
        &self,
        location: &str,
    ) -> ExternalResultImportOperation<ExternalResult> {
        ExternalResultImportOperation::new(location, self.service(), factory())
    }

    pub fn case_result_import_operation(
        &self,
        location: &str,
        workspace_id: &str,
        exp_id: &str,
        case_id: &str,
    ) -> CaseResultImportOperation<CaseResult> {
        CaseResultImportOperation::new(
            location,
            workspace_id,
            exp_id,
            case_id,
            self.service(),
            factory(),
        )
    }

    pub fn custom_artifact_import_operation(
        &self,
        location: &str,
        workspace_id: &str,
        exp_id: &str,
        case_id: &str,
    ) -> CustomArtifactImportOperation<CustomArtifact> {
        CustomArtifactImportOperation::new(
            location,
            workspace_id,
            exp_id,
            case_id,
            self.service(),
            factory(),
        )
    }

    pub fn workspace_import_operation(
        &self,
        location: &str,
    ) -> WorkspaceImportOperation<Workspace> {
        WorkspaceImportOperation::new(location, self.service(), factory())
    }

    pub fn workspace_export_operation(&self, location: &str) -> WorkspaceExportOperation<Export> {
        WorkspaceExportOperation::new(location, self.service(), factory())
    }

    pub fn workspace_conversion_operation(
        &self,
        location: &str,
    ) -> WorkspaceConversionOperation<Workspace> {
        WorkspaceConversionOperation::new(location, self.service(), factory())
    }

    pub fn orphan_cleanup_operation(&self, location: &str) -> OrphanCleanupOperation {
        OrphanCleanupOperation::new(location, self.service())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_endpoint_is_rejected_before_connecting() {
        let config = ImpactClientConfig::anonymous()
            .with_endpoint("not a url")
            .with_num_retries(0)
            .build();

        let err = ImpactClient::create(config).unwrap_err();
        assert!(matches!(err, ImpactClientError::InvalidEndpoint(e) if e == "not a url"));
    }

    #[test]
    fn unreachable_server_fails_after_retries() {
        let config = ImpactClientConfig::anonymous()
            .with_endpoint("http://127.0.0.1:1/")
            .with_num_retries(0)
            .with_retry_interval(0)
            .build();

        let err = ImpactClient::create(config).unwrap_err();
        assert!(matches!(err, ImpactClientError::ServerConnectionError(_)));
    }
}

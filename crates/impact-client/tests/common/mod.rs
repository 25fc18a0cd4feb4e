#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use impact_api::schemas::{
    ArtifactMetaResponse, AsyncStatusResponse, ExecutionStatusResponse, ExternalResultResponse,
    FmuSetupRequest, FmuSetupResponse, ProjectContentResponse, ProjectResponse, WorkspaceResponse,
};
use impact_client::ClientError;
use impact_client::operations::OperationService;
use serde_json::{Value, json};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// In-memory Impact server replaying scripted status sequences.
///
/// The last status of a sequence is repeated once the others are consumed.
#[derive(Default)]
pub struct MockService {
    execution: Mutex<VecDeque<String>>,
    jobs: Mutex<VecDeque<Value>>,
    artifacts: Vec<ArtifactMetaResponse>,
    export: Vec<u8>,
    cached_fmu: Option<Value>,
    setup_fmu: Option<String>,
    setup_requests: Mutex<Vec<Value>>,
    calls: Mutex<HashMap<&'static str, usize>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statuses reported by compilations and executions, e.g. `"running"`.
    pub fn with_execution_statuses(self, statuses: &[&str]) -> Self {
        *self.execution.lock().unwrap() = statuses.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Status envelopes reported by imports, exports and conversions.
    pub fn with_job_statuses(self, statuses: Vec<Value>) -> Self {
        *self.jobs.lock().unwrap() = statuses.into();
        self
    }

    pub fn with_artifact(mut self, id: &str, download_as: &str) -> Self {
        self.artifacts.push(ArtifactMetaResponse {
            id: id.to_string(),
            download_as: download_as.to_string(),
        });
        self
    }

    /// Answer of the FMU setup when a cached executable is asked for.
    pub fn with_cached_fmu(mut self, setup: Value) -> Self {
        self.cached_fmu = Some(setup);
        self
    }

    /// Id of the executable created by an uncached FMU setup.
    pub fn with_setup_fmu(mut self, fmu_id: &str) -> Self {
        self.setup_fmu = Some(fmu_id.to_string());
        self
    }

    /// Bodies of every FMU setup request, in order.
    pub fn setup_requests(&self) -> Vec<Value> {
        self.setup_requests.lock().unwrap().clone()
    }

    pub fn with_export(mut self, bytes: &[u8]) -> Self {
        self.export = bytes.to_vec();
        self
    }

    pub fn into_service(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self, method: &str) -> usize {
        self.calls.lock().unwrap().get(method).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    fn record(&self, method: &'static str) {
        *self.calls.lock().unwrap().entry(method).or_default() += 1;
    }

    fn next<T: Clone>(queue: &Mutex<VecDeque<T>>) -> T {
        let mut queue = queue.lock().unwrap();
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().expect("no status scripted")
        }
    }

    fn next_execution(&self) -> ExecutionStatusResponse {
        ExecutionStatusResponse {
            status: Self::next(&self.execution),
        }
    }

    fn next_job(&self) -> AsyncStatusResponse {
        serde_json::from_value(Self::next(&self.jobs)).unwrap()
    }
}

impl OperationService for MockService {
    fn fmu_setup(
        &self,
        _: &str,
        body: &FmuSetupRequest,
        get_cached: bool,
    ) -> Result<FmuSetupResponse, ClientError> {
        self.setup_requests
            .lock()
            .unwrap()
            .push(serde_json::to_value(body).unwrap());
        let setup = if get_cached {
            self.record("fmu_setup_cached");
            self.cached_fmu
                .clone()
                .unwrap_or_else(|| json!({ "id": null, "parameters": [] }))
        } else {
            self.record("fmu_setup");
            json!({ "id": self.setup_fmu, "parameters": [] })
        };
        Ok(serde_json::from_value(setup).unwrap())
    }

    fn compile_model(&self, _: &str, _: &str) -> Result<(), ClientError> {
        self.record("compile_model");
        Ok(())
    }

    fn compile_status(&self, _: &str, _: &str) -> Result<ExecutionStatusResponse, ClientError> {
        self.record("compile_status");
        Ok(self.next_execution())
    }

    fn compile_cancel(&self, _: &str, _: &str) -> Result<(), ClientError> {
        self.record("compile_cancel");
        Ok(())
    }

    fn execute_status(&self, _: &str, _: &str) -> Result<ExecutionStatusResponse, ClientError> {
        self.record("execute_status");
        Ok(self.next_execution())
    }

    fn execute_cancel(&self, _: &str, _: &str) -> Result<(), ClientError> {
        self.record("execute_cancel");
        Ok(())
    }

    fn case_get(&self, _: &str, _: &str, case_id: &str) -> Result<Value, ClientError> {
        self.record("case_get");
        Ok(json!({ "id": case_id, "run_info": { "status": "successful" } }))
    }

    fn case_result_variables_get(
        &self,
        _: &str,
        _: &str,
        _: &str,
    ) -> Result<Vec<String>, ClientError> {
        self.record("case_result_variables_get");
        Ok(vec!["time".to_string(), "inertia.w".to_string()])
    }

    fn case_artifacts_meta_get(
        &self,
        _: &str,
        _: &str,
        _: &str,
    ) -> Result<Vec<ArtifactMetaResponse>, ClientError> {
        self.record("case_artifacts_meta_get");
        Ok(self.artifacts.clone())
    }

    fn import_status(&self, _: &str) -> Result<AsyncStatusResponse, ClientError> {
        self.record("import_status");
        Ok(self.next_job())
    }

    fn export_status(&self, _: &str) -> Result<AsyncStatusResponse, ClientError> {
        self.record("export_status");
        Ok(self.next_job())
    }

    fn workspace_conversion_status(&self, _: &str) -> Result<AsyncStatusResponse, ClientError> {
        self.record("workspace_conversion_status");
        Ok(self.next_job())
    }

    fn export_download(&self, _: &str) -> Result<Vec<u8>, ClientError> {
        self.record("export_download");
        Ok(self.export.clone())
    }

    fn project_get(&self, project_id: &str) -> Result<ProjectResponse, ClientError> {
        self.record("project_get");
        Ok(ProjectResponse {
            id: project_id.to_string(),
            project_type: Some("LOCAL".to_string()),
            storage_location: Some("USERSPACE".to_string()),
            definition: json!({ "name": "Demo" }),
        })
    }

    fn project_content_get(
        &self,
        _: &str,
        content_id: &str,
    ) -> Result<ProjectContentResponse, ClientError> {
        self.record("project_content_get");
        Ok(ProjectContentResponse {
            id: content_id.to_string(),
            relpath: Some("Modelica".to_string()),
            content_type: Some("MODELICA".to_string()),
            name: Some("Modelica".to_string()),
            default_disabled: true,
        })
    }

    fn workspace_get(&self, workspace_id: &str) -> Result<WorkspaceResponse, ClientError> {
        self.record("workspace_get");
        Ok(WorkspaceResponse {
            id: workspace_id.to_string(),
            definition: json!({ "name": workspace_id }),
        })
    }

    fn external_result_get(&self, result_id: &str) -> Result<ExternalResultResponse, ClientError> {
        self.record("external_result_get");
        Ok(ExternalResultResponse {
            id: result_id.to_string(),
            name: None,
            description: None,
            workspace_id: None,
        })
    }
}

use derive_new::new;
use serde::Serialize;

#[derive(Debug, Serialize, new)]
pub struct CaseIdsSchema {
    pub ids: Vec<String>,
}

/// Body of an experiment execution request. Without `include_cases` every
/// case of the experiment is executed.
#[derive(Debug, Serialize, Default, new)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentExecuteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_cases: Option<CaseIdsSchema>,
}

impl ExperimentExecuteRequest {
    pub fn with_cases(case_ids: Vec<String>) -> Self {
        Self::new(Some(CaseIdsSchema::new(case_ids)))
    }
}

/// Compiler input of a model executable setup.
#[derive(Debug, Clone, Serialize)]
pub struct CompilationInput {
    pub class_name: String,
    pub compiler_options: serde_json::Value,
    pub runtime_options: serde_json::Value,
    pub compiler_log_level: String,
    pub fmi_target: String,
    pub fmi_version: String,
    pub platform: String,
}

impl CompilationInput {
    /// Input for compiling `class_name` with the server defaults: no
    /// options, `warning` log level, FMI 2.0 model exchange for the server
    /// platform.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            compiler_options: serde_json::json!({}),
            runtime_options: serde_json::json!({}),
            compiler_log_level: "warning".to_string(),
            fmi_target: "me".to_string(),
            fmi_version: "2.0".to_string(),
            platform: "auto".to_string(),
        }
    }

    pub fn with_compiler_options(mut self, options: serde_json::Value) -> Self {
        self.compiler_options = options;
        self
    }

    pub fn with_runtime_options(mut self, options: serde_json::Value) -> Self {
        self.runtime_options = options;
        self
    }

    pub fn with_compiler_log_level(mut self, level: impl Into<String>) -> Self {
        self.compiler_log_level = level.into();
        self
    }

    pub fn with_fmi_target(mut self, target: impl Into<String>) -> Self {
        self.fmi_target = target.into();
        self
    }

    pub fn with_fmi_version(mut self, version: impl Into<String>) -> Self {
        self.fmi_version = version.into();
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }
}

/// Body of `POST api/workspaces/{ws}/model-executables`.
#[derive(Debug, Clone, Serialize, new)]
pub struct FmuSetupRequest {
    pub input: CompilationInput,
}

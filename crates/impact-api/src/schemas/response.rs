use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts `null` where a list is expected.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Most Impact resources are wrapped in a `{"data": ...}` object.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct ItemsSchema<T> {
    pub items: Vec<T>,
}

/// Status of a compilation or an experiment execution.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionStatusResponse {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AsyncErrorSchema {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
}

/// Status of an import, export, conversion or cleanup job.
///
/// `data` carries the server chosen identifiers once the job is ready and
/// `error` the failure cause once it has failed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsyncStatusResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<AsyncErrorSchema>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub import_warnings: Vec<String>,
}

impl AsyncStatusResponse {
    /// Message of the failure cause, `"None"` when the server left it out.
    pub fn error_message(&self) -> String {
        self.error
            .as_ref()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| "None".to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: String,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub storage_location: Option<String>,
    #[serde(default)]
    pub definition: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContentResponse {
    pub id: String,
    #[serde(default)]
    pub relpath: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub default_disabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceResponse {
    pub id: String,
    #[serde(default)]
    pub definition: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalResultResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub workspace_id: Option<String>,
}

/// A modifier of a model executable, as returned by the FMU setup.
#[derive(Debug, Clone, Deserialize)]
pub struct ModifierSchema {
    pub name: String,
    pub value: Value,
}

/// Answer of the FMU setup. With `getCached=true` a missing or empty `id`
/// means no cached executable matches the compilation input.
#[derive(Debug, Clone, Deserialize)]
pub struct FmuSetupResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parameters: Vec<ModifierSchema>,
}

impl FmuSetupResponse {
    pub fn fmu_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMetaResponse {
    pub id: String,
    pub download_as: String,
}

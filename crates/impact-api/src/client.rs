use reqwest::Url;
use reqwest::header::{COOKIE, SET_COOKIE};
use serde::de::DeserializeOwned;

use crate::credentials::ImpactCredentials;
use crate::error::ClientError;
use crate::schemas::{
    ArtifactMetaResponse, AsyncStatusResponse, DataEnvelope, ExecutionStatusResponse,
    ExperimentExecuteRequest, ExternalResultResponse, FmuSetupRequest, FmuSetupResponse,
    ItemsSchema, ProjectContentResponse, ProjectResponse, WorkspaceResponse,
};

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => ClientError::from_response(status, &error.to_string()),
            None => ClientError::UnknownError(error.to_string()),
        }
    }
}

trait ResponseExt {
    fn map_to_impact_err(self) -> Result<reqwest::blocking::Response, ClientError>;
}

impl ResponseExt for reqwest::blocking::Response {
    fn map_to_impact_err(self) -> Result<reqwest::blocking::Response, ClientError> {
        if self.status().is_success() {
            Ok(self)
        } else {
            let status = self.status();
            let text = self
                .text()
                .map_err(|e| ClientError::UnknownError(e.to_string()))?;
            Err(ClientError::from_response(status, &text))
        }
    }
}

/// A client for making HTTP requests to the Impact API.
///
/// The client is the transport used by the operation layer: it queries the
/// status of compilations, executions and imports, requests cancellation and
/// fetches the resources an operation resolves to.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: reqwest::blocking::Client,
    base_url: Url,
    session_cookie: Option<String>,
}

impl Client {
    /// Create a new Client with the given base URL and log in with the API key.
    pub fn new(base_url: Url, credentials: &ImpactCredentials) -> Result<Self, ClientError> {
        let mut client = Self::new_without_credentials(base_url);
        let cookie = client.login(Some(credentials))?;
        client.session_cookie = Some(cookie);
        Ok(client)
    }

    /// Create a new Client and log in without an API key.
    pub fn new_anonymous(base_url: Url) -> Result<Self, ClientError> {
        let mut client = Self::new_without_credentials(base_url);
        let cookie = client.login(None)?;
        client.session_cookie = Some(cookie);
        Ok(client)
    }

    /// Create a new Client without logging in.
    pub fn new_without_credentials(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Client {
            http_client: reqwest::blocking::Client::new(),
            base_url,
            session_cookie: None,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn get_json<R>(&self, path: impl AsRef<str>) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        let response = self.req(reqwest::Method::GET, path, None::<serde_json::Value>)?;
        let json = response.json::<R>()?;
        Ok(json)
    }

    pub fn post_json<T, R>(&self, path: impl AsRef<str>, body: Option<T>) -> Result<R, ClientError>
    where
        T: serde::Serialize,
        R: DeserializeOwned,
    {
        let response = self.req(reqwest::Method::POST, path, body)?;
        let json = response.json::<R>()?;
        Ok(json)
    }

    pub fn post<T>(&self, path: impl AsRef<str>, body: Option<T>) -> Result<(), ClientError>
    where
        T: serde::Serialize,
    {
        self.req(reqwest::Method::POST, path, body).map(|_| ())
    }

    pub fn put<T>(&self, path: impl AsRef<str>, body: Option<T>) -> Result<(), ClientError>
    where
        T: serde::Serialize,
    {
        self.req(reqwest::Method::PUT, path, body).map(|_| ())
    }

    pub fn delete(&self, path: impl AsRef<str>) -> Result<(), ClientError> {
        self.req(reqwest::Method::DELETE, path, None::<serde_json::Value>)
            .map(|_| ())
    }

    pub fn get_bytes(&self, path: impl AsRef<str>) -> Result<Vec<u8>, ClientError> {
        let response = self.req(reqwest::Method::GET, path, None::<serde_json::Value>)?;
        Ok(response.bytes()?.to_vec())
    }

    fn req<T: serde::Serialize>(
        &self,
        method: reqwest::Method,
        path: impl AsRef<str>,
        body: Option<T>,
    ) -> Result<reqwest::blocking::Response, ClientError> {
        let url = self.join(path.as_ref())?;
        log::debug!("{method} {url}");
        let request_builder = self.http_client.request(method, url);

        let mut request_builder = if let Some(body) = body {
            request_builder.json(&body)
        } else {
            request_builder
        };

        if let Some(cookie) = self.session_cookie.as_ref() {
            request_builder = request_builder.header(COOKIE, cookie);
        }

        let response = request_builder.send()?.map_to_impact_err()?;

        Ok(response)
    }

    /// Check if the Impact server is reachable.
    pub fn health_check(&self) -> Result<(), ClientError> {
        let url = self.join("api/")?;
        self.http_client.get(url).send()?.map_to_impact_err()?;
        Ok(())
    }

    /// Get the session cookie if it exists.
    pub fn get_session_cookie(&self) -> Option<&String> {
        self.session_cookie.as_ref()
    }

    /// Join the given path to the base URL.
    fn join(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::UnknownError(format!("Invalid url path '{path}': {e}")))
    }

    /// Log in to the Impact server, anonymously when no credentials are given.
    fn login(&self, credentials: Option<&ImpactCredentials>) -> Result<String, ClientError> {
        let url = self.join("api/login")?;

        let request = self.http_client.post(url);
        let request = match credentials {
            Some(credentials) => request.json(credentials),
            None => request.json(&serde_json::json!({})),
        };
        let res = request.send()?.map_to_impact_err()?;

        let cookie_header = res.headers().get(SET_COOKIE);
        match cookie_header.and_then(|cookie| cookie.to_str().ok()) {
            Some(cookie_str) => {
                let session = cookie_str.split(';').next().unwrap_or(cookie_str);
                Ok(session.to_string())
            }
            None => Err(ClientError::BadSessionId),
        }
    }

    /// Set up a model executable for `body`. With `get_cached` the server
    /// answers with a matching, already compiled executable if it has one.
    pub fn fmu_setup(
        &self,
        workspace_id: &str,
        body: &FmuSetupRequest,
        get_cached: bool,
    ) -> Result<FmuSetupResponse, ClientError> {
        self.post_json(fmu_setup_path(workspace_id, get_cached), Some(body))
    }

    pub fn compile_model(&self, workspace_id: &str, fmu_id: &str) -> Result<(), ClientError> {
        self.post(
            compilation_path(workspace_id, fmu_id),
            None::<serde_json::Value>,
        )
    }

    pub fn compile_status(
        &self,
        workspace_id: &str,
        fmu_id: &str,
    ) -> Result<ExecutionStatusResponse, ClientError> {
        self.get_json(compilation_path(workspace_id, fmu_id))
    }

    pub fn compile_cancel(&self, workspace_id: &str, fmu_id: &str) -> Result<(), ClientError> {
        self.delete(compilation_path(workspace_id, fmu_id))
    }

    pub fn experiment_execute(
        &self,
        workspace_id: &str,
        exp_id: &str,
        body: &ExperimentExecuteRequest,
    ) -> Result<(), ClientError> {
        self.post(execution_path(workspace_id, exp_id), Some(body))
    }

    pub fn execute_status(
        &self,
        workspace_id: &str,
        exp_id: &str,
    ) -> Result<ExecutionStatusResponse, ClientError> {
        self.get_json(execution_path(workspace_id, exp_id))
    }

    pub fn execute_cancel(&self, workspace_id: &str, exp_id: &str) -> Result<(), ClientError> {
        self.delete(execution_path(workspace_id, exp_id))
    }

    pub fn case_get(
        &self,
        workspace_id: &str,
        exp_id: &str,
        case_id: &str,
    ) -> Result<serde_json::Value, ClientError> {
        self.get_json(case_path(workspace_id, exp_id, case_id))
    }

    pub fn case_result_variables_get(
        &self,
        workspace_id: &str,
        exp_id: &str,
        case_id: &str,
    ) -> Result<Vec<String>, ClientError> {
        self.get_json(format!(
            "{}/variables",
            case_path(workspace_id, exp_id, case_id)
        ))
    }

    pub fn case_artifacts_meta_get(
        &self,
        workspace_id: &str,
        exp_id: &str,
        case_id: &str,
    ) -> Result<Vec<ArtifactMetaResponse>, ClientError> {
        let resp: DataEnvelope<ItemsSchema<ArtifactMetaResponse>> = self.get_json(format!(
            "{}/custom-artifacts",
            case_path(workspace_id, exp_id, case_id)
        ))?;
        Ok(resp.data.items)
    }

    /// Status of an import job at the location returned by the import request.
    pub fn import_status(&self, location: &str) -> Result<AsyncStatusResponse, ClientError> {
        self.get_json::<DataEnvelope<AsyncStatusResponse>>(location)
            .map(|resp| resp.data)
    }

    pub fn export_status(&self, location: &str) -> Result<AsyncStatusResponse, ClientError> {
        self.get_json::<DataEnvelope<AsyncStatusResponse>>(location)
            .map(|resp| resp.data)
    }

    pub fn workspace_conversion_status(
        &self,
        location: &str,
    ) -> Result<AsyncStatusResponse, ClientError> {
        self.get_json::<DataEnvelope<AsyncStatusResponse>>(location)
            .map(|resp| resp.data)
    }

    pub fn export_download(&self, download_uri: &str) -> Result<Vec<u8>, ClientError> {
        self.get_bytes(download_uri)
    }

    pub fn project_get(&self, project_id: &str) -> Result<ProjectResponse, ClientError> {
        self.get_json(format!("api/projects/{project_id}?vcsInfo=true"))
    }

    pub fn project_content_get(
        &self,
        project_id: &str,
        content_id: &str,
    ) -> Result<ProjectContentResponse, ClientError> {
        self.get_json(format!("api/projects/{project_id}/content/{content_id}"))
    }

    pub fn workspace_get(&self, workspace_id: &str) -> Result<WorkspaceResponse, ClientError> {
        self.get_json(format!("api/workspaces/{workspace_id}"))
    }

    pub fn external_result_get(
        &self,
        result_id: &str,
    ) -> Result<ExternalResultResponse, ClientError> {
        self.get_json::<DataEnvelope<ExternalResultResponse>>(format!(
            "api/external-result/{result_id}"
        ))
        .map(|resp| resp.data)
    }
}

fn fmu_setup_path(workspace_id: &str, get_cached: bool) -> String {
    format!("api/workspaces/{workspace_id}/model-executables?getCached={get_cached}")
}

fn compilation_path(workspace_id: &str, fmu_id: &str) -> String {
    format!("api/workspaces/{workspace_id}/model-executables/{fmu_id}/compilation")
}

fn execution_path(workspace_id: &str, exp_id: &str) -> String {
    format!("api/workspaces/{workspace_id}/experiments/{exp_id}/execution")
}

fn case_path(workspace_id: &str, exp_id: &str, case_id: &str) -> String {
    format!("api/workspaces/{workspace_id}/experiments/{exp_id}/cases/{case_id}")
}

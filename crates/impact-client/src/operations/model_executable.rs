use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use derive_new::new;
use impact_api::schemas::{CompilationInput, FmuSetupRequest, ModifierSchema};
use serde_json::Value;

use crate::error::OperationError;
use crate::operations::base::{EntityFactory, ExecutionOperation, Operation, parse_status};
use crate::operations::poller::Poller;
use crate::operations::service::OperationService;
use crate::operations::status::Status;

/// Identifiers of a compiled model executable.
#[derive(Debug, Clone, PartialEq, new)]
pub struct ModelExecutableArgs {
    pub workspace_id: String,
    pub fmu_id: String,
    pub info: Option<Value>,
    pub modifiers: Option<Value>,
}

/// Tracks the compilation of a model into an executable.
pub struct ModelExecutableOperation<E> {
    workspace_id: String,
    fmu_id: String,
    service: Arc<dyn OperationService>,
    create_entity: EntityFactory<ModelExecutableArgs, E>,
}

impl<E> ModelExecutableOperation<E> {
    pub fn new(
        workspace_id: impl Into<String>,
        fmu_id: impl Into<String>,
        service: Arc<dyn OperationService>,
        create_entity: EntityFactory<ModelExecutableArgs, E>,
    ) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            fmu_id: fmu_id.into(),
            service,
            create_entity,
        }
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }
}

impl<E> Operation for ModelExecutableOperation<E> {
    type Status = Status;
    type Entity = E;

    fn id(&self) -> &str {
        &self.fmu_id
    }

    fn name(&self) -> &'static str {
        "Compilation"
    }

    fn status(&self) -> Result<Status, OperationError> {
        let resp = self
            .service
            .compile_status(&self.workspace_id, &self.fmu_id)?;
        parse_status(&resp.status)
    }

    fn data(&self) -> Result<E, OperationError> {
        Ok((self.create_entity)(ModelExecutableArgs::new(
            self.workspace_id.clone(),
            self.fmu_id.clone(),
            None,
            None,
        )))
    }

    fn cancel(&self) -> Result<(), OperationError> {
        self.service
            .compile_cancel(&self.workspace_id, &self.fmu_id)?;
        Ok(())
    }
}

impl<E> ExecutionOperation for ModelExecutableOperation<E> {}

impl<E> PartialEq for ModelExecutableOperation<E> {
    fn eq(&self, other: &Self) -> bool {
        self.fmu_id == other.fmu_id
    }
}

impl<E> fmt::Display for ModelExecutableOperation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Model executable operations for id '{}'", self.fmu_id)
    }
}

impl<E> fmt::Debug for ModelExecutableOperation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelExecutableOperation")
            .field("workspace_id", &self.workspace_id)
            .field("fmu_id", &self.fmu_id)
            .finish_non_exhaustive()
    }
}

/// A compilation answered from the server's cache.
///
/// The executable already exists, so the operation is `DONE` from the start
/// and never queries the server.
pub struct CachedModelExecutableOperation<E> {
    args: ModelExecutableArgs,
    create_entity: EntityFactory<ModelExecutableArgs, E>,
}

impl<E> CachedModelExecutableOperation<E> {
    pub fn new(
        workspace_id: impl Into<String>,
        fmu_id: impl Into<String>,
        info: Option<Value>,
        modifiers: Option<Value>,
        create_entity: EntityFactory<ModelExecutableArgs, E>,
    ) -> Self {
        Self {
            args: ModelExecutableArgs::new(workspace_id.into(), fmu_id.into(), info, modifiers),
            create_entity,
        }
    }

    pub fn workspace_id(&self) -> &str {
        &self.args.workspace_id
    }
}

impl<E> Operation for CachedModelExecutableOperation<E> {
    type Status = Status;
    type Entity = E;

    fn id(&self) -> &str {
        &self.args.fmu_id
    }

    fn name(&self) -> &'static str {
        "Looking for cached FMU"
    }

    fn status(&self) -> Result<Status, OperationError> {
        Ok(Status::Done)
    }

    fn data(&self) -> Result<E, OperationError> {
        Ok((self.create_entity)(self.args.clone()))
    }

    fn cancel(&self) -> Result<(), OperationError> {
        Err(OperationError::NotSupported(
            "Cancel is not supported for CachedModelExecutableOperation".to_string(),
        ))
    }
}

impl<E> ExecutionOperation for CachedModelExecutableOperation<E> {
    /// Returns immediately: the timeout is ignored and any status other than
    /// `DONE` can never be reached.
    fn wait_with(
        &self,
        _poller: &Poller,
        _timeout: Option<Duration>,
        status: Status,
    ) -> Result<E, OperationError> {
        let current = self.status()?;
        if current != status {
            return Err(OperationError::UnreachableStatus {
                name: self.name().to_string(),
                status: current.to_string(),
                requested: status.to_string(),
            });
        }

        log::info!("Cached FMU found! Using the cached FMU!");
        self.data()
    }
}

impl<E> PartialEq for CachedModelExecutableOperation<E> {
    fn eq(&self, other: &Self) -> bool {
        self.args.fmu_id == other.args.fmu_id
    }
}

impl<E> fmt::Display for CachedModelExecutableOperation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cached model executable operations for id '{}'",
            self.args.fmu_id
        )
    }
}

impl<E> fmt::Debug for CachedModelExecutableOperation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedModelExecutableOperation")
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// A compilation request, answered either by an executable the server
/// already has or by a freshly started compilation.
pub enum Compilation<E> {
    Cached(CachedModelExecutableOperation<E>),
    Started(ModelExecutableOperation<E>),
}

impl<E> Compilation<E> {
    /// Set up an executable for `input` and compile it.
    ///
    /// Unless `force_compilation` is set, the server is first asked for a
    /// cached executable matching `input`; a hit is returned without
    /// compiling, together with the modifiers of the cached executable.
    pub fn start(
        service: Arc<dyn OperationService>,
        workspace_id: &str,
        input: CompilationInput,
        force_compilation: bool,
        create_entity: EntityFactory<ModelExecutableArgs, E>,
    ) -> Result<Self, OperationError> {
        let body = FmuSetupRequest::new(input);

        if !force_compilation {
            let cached = service.fmu_setup(workspace_id, &body, true)?;
            if let Some(fmu_id) = cached.fmu_id() {
                log::debug!("Cached executable {fmu_id} matches {}", body.input.class_name);
                return Ok(Compilation::Cached(CachedModelExecutableOperation::new(
                    workspace_id,
                    fmu_id,
                    None,
                    Some(modifiers(&cached.parameters)),
                    create_entity,
                )));
            }
        }

        let setup = service.fmu_setup(workspace_id, &body, false)?;
        let fmu_id = setup.fmu_id().ok_or_else(|| {
            OperationError::MalformedResponse(format!(
                "No model executable id in the setup of {}",
                body.input.class_name
            ))
        })?;
        service.compile_model(workspace_id, fmu_id)?;

        Ok(Compilation::Started(ModelExecutableOperation::new(
            workspace_id,
            fmu_id,
            service,
            create_entity,
        )))
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, Compilation::Cached(_))
    }
}

fn modifiers(parameters: &[ModifierSchema]) -> Value {
    Value::Object(
        parameters
            .iter()
            .map(|m| (m.name.clone(), m.value.clone()))
            .collect(),
    )
}

impl<E> Operation for Compilation<E> {
    type Status = Status;
    type Entity = E;

    fn id(&self) -> &str {
        match self {
            Compilation::Cached(op) => op.id(),
            Compilation::Started(op) => op.id(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Compilation::Cached(op) => op.name(),
            Compilation::Started(op) => op.name(),
        }
    }

    fn status(&self) -> Result<Status, OperationError> {
        match self {
            Compilation::Cached(op) => op.status(),
            Compilation::Started(op) => op.status(),
        }
    }

    fn data(&self) -> Result<E, OperationError> {
        match self {
            Compilation::Cached(op) => op.data(),
            Compilation::Started(op) => op.data(),
        }
    }

    fn cancel(&self) -> Result<(), OperationError> {
        match self {
            Compilation::Cached(op) => op.cancel(),
            Compilation::Started(op) => op.cancel(),
        }
    }
}

impl<E> ExecutionOperation for Compilation<E> {
    fn wait_with(
        &self,
        poller: &Poller,
        timeout: Option<Duration>,
        status: Status,
    ) -> Result<E, OperationError> {
        match self {
            Compilation::Cached(op) => op.wait_with(poller, timeout, status),
            Compilation::Started(op) => op.wait_with(poller, timeout, status),
        }
    }
}

impl<E> fmt::Display for Compilation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compilation::Cached(op) => fmt::Display::fmt(op, f),
            Compilation::Started(op) => fmt::Display::fmt(op, f),
        }
    }
}

impl<E> fmt::Debug for Compilation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compilation::Cached(op) => f.debug_tuple("Cached").field(op).finish(),
            Compilation::Started(op) => f.debug_tuple("Started").field(op).finish(),
        }
    }
}

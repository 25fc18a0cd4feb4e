//! Client for the Modelon Impact simulation service.
//!
//! Long running server side work (compilations, experiment executions,
//! imports, exports) is represented by operations, see [`operations`].

mod client;
pub mod config;
pub mod entities;
pub mod error;
pub mod operations;

pub use crate::client::ImpactClient;
pub use crate::config::{ImpactClientConfig, ImpactClientConfigBuilder};
pub use crate::error::{FailureKind, ImpactClientError, OperationError};

pub use impact_api::schemas::CompilationInput;
pub use impact_api::{ClientError, ImpactCredentials};

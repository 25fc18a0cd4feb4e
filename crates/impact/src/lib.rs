#![warn(missing_docs)]

//! # Modelon Impact

/// Impact client and operations
#[cfg(feature = "client")]
pub use impact_client::*;

/// Impact REST transport
#[cfg(feature = "api")]
pub mod api {
    pub use impact_api::*;
}

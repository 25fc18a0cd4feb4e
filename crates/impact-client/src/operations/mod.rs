//! Operations observe long running, server side jobs.
//!
//! Compilations and executions report a [`Status`] and are waited on with
//! [`ExecutionOperation::wait`], which accepts any target status. Imports,
//! exports and conversions report an [`AsyncOperationStatus`] and are waited
//! on with [`AsyncOperation::wait`] until they are `READY` or `ERROR`.

/// Implements equality on the job location together with `Display` and
/// `Debug` for a location based operation.
macro_rules! location_operation_traits {
    ($ty:ident, $label:literal) => {
        impl<E> PartialEq for $ty<E> {
            fn eq(&self, other: &Self) -> bool {
                self.location == other.location
            }
        }

        location_operation_traits!(@fmt $ty, $ty<E>, $label, E);
    };
    (@plain $ty:ident, $label:literal) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.location == other.location
            }
        }

        location_operation_traits!(@fmt $ty, $ty, $label,);
    };
    (@fmt $name:ident, $ty:ty, $label:literal, $($g:ident)?) => {
        impl<$($g)?> std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, " operations for id '{}'"), self.id())
            }
        }

        impl<$($g)?> std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("location", &self.location)
                    .finish_non_exhaustive()
            }
        }
    };
}

mod base;
mod case;
mod case_result;
mod content_import;
mod custom_artifact;
mod experiment;
mod external_result;
mod fmu_import;
mod model_executable;
mod orphan_cleanup;
mod poller;
mod project_import;
pub mod service;
mod status;
mod workspace;

pub use base::*;
pub use case::*;
pub use case_result::*;
pub use content_import::*;
pub use custom_artifact::*;
pub use experiment::*;
pub use external_result::*;
pub use fmu_import::*;
pub use model_executable::*;
pub use orphan_cleanup::*;
pub use poller::*;
pub use project_import::*;
pub use service::OperationService;
pub use status::*;
pub use workspace::*;

//! Labeled-array host types with namespaced accessor extensions.
//! Library code registers accessors once at startup; instances build them
//! lazily on first read and cache them per instance.

pub mod accessor;
pub mod logging;
pub mod model;

pub use accessor::cached::{AccessorSlots, CachedAccessor};
pub use accessor::error::{
    AccessorError, AccessorRegistrationError, BoxError, RegistrationConflict,
};
pub use accessor::factory::{Accessor, AccessorFactory, AccessorValue};
pub use accessor::host::{HostKind, HOST_KIND_ATTRIBUTES};
pub use accessor::registry::{
    is_valid_accessor_name, register_dataarray_accessor, register_dataset_accessor, register_for,
    AccessorRegistrar, AccessorTable,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{DataArray, Dataset, ModelError, ModelResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Namespaced accessor extensions for host kinds.
//!
//! Third-party code registers a factory under a name on `DataArray` or
//! `Dataset`. The first read of that name on an instance builds the accessor
//! from the instance and caches it in the instance's private slot storage.
//!
//! # Invariants
//! - At most one registration exists per (host kind, name).
//! - Registration never shadows a built-in attribute of the host kind.
//! - A factory runs at most once per instance after a successful build.
//! - A failed build leaves the slot unresolved; the next read retries.
//!
//! # See also
//! - `registry` for the registration entry points.
//! - `cached` for per-instance slot resolution.

pub mod cached;
pub mod error;
pub mod factory;
pub mod host;
pub mod registry;

//! Per-host-kind accessor tables and registration entry points.
//!
//! # Responsibility
//! - Keep one name -> accessor table per host kind for the process lifetime.
//! - Validate names and reject collisions before anything is installed.
//!
//! # Invariants
//! - A failed registration leaves the table unchanged.
//! - Entries are never removed or replaced.

use crate::accessor::cached::CachedAccessor;
use crate::accessor::error::{AccessorRegistrationError, BoxError, RegistrationConflict};
use crate::accessor::factory::{Accessor, AccessorFactory};
use crate::accessor::host::HostKind;
use crate::model::{DataArray, Dataset};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

static ACCESSOR_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid accessor name regex"));

/// Returns whether `name` can be used as an accessor name.
pub fn is_valid_accessor_name(name: &str) -> bool {
    ACCESSOR_NAME_RE.is_match(name)
}

/// Process-wide accessor table for one host kind.
pub struct AccessorTable<H> {
    entries: RwLock<BTreeMap<String, CachedAccessor<H>>>,
}

impl<H> AccessorTable<H> {
    pub const fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn get(&self, name: &str) -> Option<CachedAccessor<H>> {
        self.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Returns sorted accessor names.
    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, CachedAccessor<H>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, CachedAccessor<H>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<H> Default for AccessorTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Debug for AccessorTable<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessorTable")
            .field("names", &self.names())
            .finish()
    }
}

/// Pending registration of one name on host kind `H`.
///
/// Returned by `register_for`; applying it to a factory performs the
/// registration and hands the factory back unchanged.
#[must_use = "a registrar does nothing until a factory is registered"]
pub struct AccessorRegistrar<H> {
    name: String,
    _host: PhantomData<fn() -> H>,
}

/// Starts a registration of `name` on host kind `H`.
pub fn register_for<H: HostKind>(name: impl Into<String>) -> AccessorRegistrar<H> {
    AccessorRegistrar {
        name: name.into(),
        _host: PhantomData,
    }
}

/// Starts a registration of `name` on `DataArray`.
pub fn register_dataarray_accessor(name: impl Into<String>) -> AccessorRegistrar<DataArray> {
    register_for(name)
}

/// Starts a registration of `name` on `Dataset`.
pub fn register_dataset_accessor(name: impl Into<String>) -> AccessorRegistrar<Dataset> {
    register_for(name)
}

impl<H: HostKind> AccessorRegistrar<H> {
    /// Installs `factory` under this name and returns it unchanged.
    ///
    /// # Errors
    /// - `InvalidName` when the name is not an identifier.
    /// - `Conflict` when `H` already exposes an attribute with this name,
    ///   whether built-in or registered earlier.
    pub fn register(
        self,
        factory: AccessorFactory<H>,
    ) -> Result<AccessorFactory<H>, AccessorRegistrationError<H>> {
        let name = self.name;
        if !is_valid_accessor_name(&name) {
            warn!(
                "event=accessor_register module=accessor status=error kind={} reason=invalid_name",
                H::KIND
            );
            return Err(AccessorRegistrationError::InvalidName(name));
        }

        let mut entries = H::accessor_table().write();
        if H::is_builtin_attribute(&name) || entries.contains_key(&name) {
            drop(entries);
            warn!(
                "event=accessor_register module=accessor status=error kind={} name={} reason=conflict",
                H::KIND,
                name
            );
            return Err(RegistrationConflict {
                kind: H::KIND,
                name,
                factory,
            }
            .into());
        }
        entries.insert(name.clone(), CachedAccessor::new(name.clone(), factory.clone()));
        drop(entries);

        info!(
            "event=accessor_register module=accessor status=ok kind={} name={} accessor={}",
            H::KIND,
            name,
            factory.accessor_type_name()
        );
        Ok(factory)
    }

    /// Registers a fallible build function.
    pub fn register_fn<A, E, F>(
        self,
        build: F,
    ) -> Result<AccessorFactory<H>, AccessorRegistrationError<H>>
    where
        A: Any + Send + Sync,
        E: Into<BoxError>,
        F: Fn(&H) -> Result<A, E> + Send + Sync + 'static,
    {
        self.register(AccessorFactory::new(build))
    }

    /// Registers an `Accessor` implementation.
    pub fn register_accessor<A: Accessor<H>>(
        self,
    ) -> Result<AccessorFactory<H>, AccessorRegistrationError<H>> {
        self.register(AccessorFactory::of::<A>())
    }
}

//! Type-erased accessor factories.

use crate::accessor::error::BoxError;
use std::any::{type_name, Any, TypeId};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Materialized accessor value stored in an instance slot.
pub type AccessorValue = Arc<dyn Any + Send + Sync>;

type BuildFn<H> = dyn Fn(&H) -> Result<AccessorValue, BoxError> + Send + Sync;

/// Typed accessor built from one host instance.
///
/// Implementors play the role of an accessor class: `new` receives the host
/// object and returns the namespace object exposed under the registered name.
pub trait Accessor<H>: Sized + Send + Sync + 'static {
    type Error: Into<BoxError>;

    fn new(obj: &H) -> Result<Self, Self::Error>;
}

/// Shared handle to a registered factory.
///
/// Clones share identity: `ptr_eq` is true for every clone of one handle, which
/// is how type-level lookups return "the same" factory that was registered.
pub struct AccessorFactory<H> {
    build: Arc<BuildFn<H>>,
    accessor_type: TypeId,
    accessor_type_name: &'static str,
}

impl<H: 'static> AccessorFactory<H> {
    /// Wraps a fallible build function producing accessors of type `A`.
    pub fn new<A, E, F>(build: F) -> Self
    where
        A: Any + Send + Sync,
        E: Into<BoxError>,
        F: Fn(&H) -> Result<A, E> + Send + Sync + 'static,
    {
        Self {
            build: Arc::new(move |obj: &H| {
                build(obj)
                    .map(|accessor| Arc::new(accessor) as AccessorValue)
                    .map_err(|err| -> BoxError { err.into() })
            }),
            accessor_type: TypeId::of::<A>(),
            accessor_type_name: type_name::<A>(),
        }
    }

    /// Wraps a build function that cannot fail.
    pub fn infallible<A, F>(build: F) -> Self
    where
        A: Any + Send + Sync,
        F: Fn(&H) -> A + Send + Sync + 'static,
    {
        Self::new(move |obj: &H| Ok::<A, std::convert::Infallible>(build(obj)))
    }

    /// Factory for an `Accessor` implementation.
    pub fn of<A: Accessor<H>>() -> Self {
        Self::new(<A as Accessor<H>>::new)
    }
}

impl<H> AccessorFactory<H> {
    /// Runs the factory against one host instance.
    pub fn build(&self, obj: &H) -> Result<AccessorValue, BoxError> {
        (self.build)(obj)
    }

    pub fn accessor_type(&self) -> TypeId {
        self.accessor_type
    }

    /// Rust type name of the accessor this factory produces.
    pub fn accessor_type_name(&self) -> &'static str {
        self.accessor_type_name
    }

    /// Whether both handles refer to the same registered factory.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.build), Arc::as_ptr(&other.build))
    }
}

impl<H> Clone for AccessorFactory<H> {
    fn clone(&self) -> Self {
        Self {
            build: Arc::clone(&self.build),
            accessor_type: self.accessor_type,
            accessor_type_name: self.accessor_type_name,
        }
    }
}

impl<H> Debug for AccessorFactory<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessorFactory")
            .field("accessor_type", &self.accessor_type_name)
            .finish_non_exhaustive()
    }
}

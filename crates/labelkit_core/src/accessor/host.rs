//! Host kind contract for types that accept accessor extensions.

use crate::accessor::cached::AccessorSlots;
use crate::accessor::error::AccessorError;
use crate::accessor::factory::AccessorFactory;
use crate::accessor::registry::AccessorTable;
use std::any::{type_name, Any, TypeId};
use std::sync::Arc;

/// Attribute names every host kind exposes through `HostKind` itself and the
/// std/serde traits all host kinds implement.
pub const HOST_KIND_ATTRIBUTES: &[&str] = &[
    "accessor",
    "accessor_factory",
    "accessor_slots",
    "accessor_table",
    "borrow",
    "borrow_mut",
    "clone",
    "clone_from",
    "clone_into",
    "deserialize",
    "eq",
    "fmt",
    "from",
    "has_attribute",
    "into",
    "is_accessor_resolved",
    "is_builtin_attribute",
    "ne",
    "registered_accessors",
    "serialize",
    "to_owned",
    "try_from",
    "try_into",
    "type_id",
];

/// A type that accessors can be attached to.
///
/// Implemented by `DataArray` and `Dataset`. Each implementor owns one
/// process-wide `AccessorTable` and embeds `AccessorSlots` in every instance.
pub trait HostKind: Sized + 'static {
    /// Type name used in errors and log events.
    const KIND: &'static str;

    /// Attribute names taken by the type's own fields and inherent methods.
    /// Names in `HOST_KIND_ATTRIBUTES` are always taken as well.
    const BUILTIN_ATTRIBUTES: &'static [&'static str];

    fn accessor_table() -> &'static AccessorTable<Self>;

    fn accessor_slots(&self) -> &AccessorSlots;

    /// Whether `name` is a field or method of the type, as opposed to a
    /// registered accessor.
    fn is_builtin_attribute(name: &str) -> bool {
        HOST_KIND_ATTRIBUTES.contains(&name) || Self::BUILTIN_ATTRIBUTES.contains(&name)
    }

    /// Whether the type already exposes `name`, as a built-in or a
    /// registered accessor.
    fn has_attribute(name: &str) -> bool {
        Self::is_builtin_attribute(name) || Self::accessor_table().contains(name)
    }

    /// Type-level accessor lookup: the registered factory itself.
    fn accessor_factory(name: &str) -> Option<AccessorFactory<Self>> {
        Self::accessor_table()
            .get(name)
            .map(|cached| cached.factory().clone())
    }

    /// Sorted names of all accessors registered on this kind.
    fn registered_accessors() -> Vec<String> {
        Self::accessor_table().names()
    }

    /// Reads the accessor registered under `name`, building it on first use.
    ///
    /// # Errors
    /// - `NotRegistered` when no accessor exists under `name`.
    /// - `TypeMismatch` when the registered accessor is not an `A`; the
    ///   factory is not invoked in that case.
    /// - `Construction` when the factory fails; the slot stays unresolved.
    fn accessor<A: Any + Send + Sync>(&self, name: &str) -> Result<Arc<A>, AccessorError> {
        let cached = Self::accessor_table()
            .get(name)
            .ok_or_else(|| AccessorError::NotRegistered {
                kind: Self::KIND,
                name: name.to_string(),
            })?;
        let mismatch = || AccessorError::TypeMismatch {
            kind: Self::KIND,
            name: name.to_string(),
            expected: type_name::<A>(),
            registered: cached.factory().accessor_type_name(),
        };
        if cached.factory().accessor_type() != TypeId::of::<A>() {
            return Err(mismatch());
        }

        cached
            .resolve(self)?
            .downcast::<A>()
            .map_err(|_| mismatch())
    }

    /// Whether `name` is resolved on this instance. Never builds.
    fn is_accessor_resolved(&self, name: &str) -> bool {
        self.accessor_slots().is_resolved(name)
    }
}

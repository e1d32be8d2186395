//! Lazily resolved, per-instance accessor slots.
//!
//! # Responsibility
//! - Bind a factory to a name (`CachedAccessor`).
//! - Hold one once-cell per accessor name inside each host instance
//!   (`AccessorSlots`).
//!
//! # Invariants
//! - A slot moves from unresolved to resolved exactly once and never back.
//! - A failed build leaves the slot unresolved.
//! - The slot map lock is never held while a factory runs, so a factory may
//!   read other accessors on the same instance.
//! - A factory that reads its own accessor on the same instance during
//!   construction is unsupported and blocks on its own slot.

use crate::accessor::error::AccessorError;
use crate::accessor::factory::{AccessorFactory, AccessorValue};
use crate::accessor::host::HostKind;
use log::{debug, warn};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Slot = Arc<OnceCell<AccessorValue>>;

/// Registered (name, factory) pair, consulted on every instance read.
pub struct CachedAccessor<H> {
    name: String,
    factory: AccessorFactory<H>,
}

impl<H: HostKind> CachedAccessor<H> {
    pub fn new(name: impl Into<String>, factory: AccessorFactory<H>) -> Self {
        Self {
            name: name.into(),
            factory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type-level view: the factory exactly as it was registered.
    pub fn factory(&self) -> &AccessorFactory<H> {
        &self.factory
    }

    /// Instance-level view: returns the cached accessor, building it first if
    /// this instance has never resolved it.
    pub fn resolve(&self, obj: &H) -> Result<AccessorValue, AccessorError> {
        let slot = obj.accessor_slots().slot(&self.name);
        if let Some(value) = slot.get() {
            return Ok(Arc::clone(value));
        }

        let value = slot
            .get_or_try_init(|| {
                let built = self.factory.build(obj);
                match &built {
                    Ok(_) => debug!(
                        "event=accessor_resolve module=accessor status=ok kind={} name={} accessor={}",
                        H::KIND,
                        self.name,
                        self.factory.accessor_type_name()
                    ),
                    Err(err) => warn!(
                        "event=accessor_resolve module=accessor status=error kind={} name={} error={}",
                        H::KIND,
                        self.name,
                        err
                    ),
                }
                built
            })
            .map_err(|source| AccessorError::Construction {
                kind: H::KIND,
                name: self.name.clone(),
                source,
            })?;
        Ok(Arc::clone(value))
    }
}

impl<H> Clone for CachedAccessor<H> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            factory: self.factory.clone(),
        }
    }
}

impl<H> Debug for CachedAccessor<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedAccessor")
            .field("name", &self.name)
            .field("factory", &self.factory)
            .finish()
    }
}

/// Private accessor storage embedded in each host instance.
///
/// Cloning yields empty storage: a copied host is a new instance and resolves
/// its accessors on its own.
#[derive(Default)]
pub struct AccessorSlots {
    slots: RwLock<BTreeMap<String, Slot>>,
}

impl AccessorSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` has been resolved on this instance. Never builds.
    pub fn is_resolved(&self, name: &str) -> bool {
        self.read()
            .get(name)
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Sorted names of resolved accessors.
    pub fn resolved_names(&self) -> Vec<String> {
        self.read()
            .iter()
            .filter(|(_, slot)| slot.get().is_some())
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn slot(&self, name: &str) -> Slot {
        {
            let slots = self.read();
            if let Some(slot) = slots.get(name) {
                return Arc::clone(slot);
            }
        }
        Arc::clone(self.write().entry(name.to_string()).or_default())
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Slot>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Slot>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clone for AccessorSlots {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl Debug for AccessorSlots {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessorSlots")
            .field("resolved", &self.resolved_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessorSlots, CachedAccessor};
    use crate::accessor::factory::AccessorFactory;
    use crate::accessor::host::HostKind;
    use crate::model::Dataset;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn resolve_builds_once_and_serves_cached_value() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cached = CachedAccessor::new(
            "slot_unit_once",
            AccessorFactory::<Dataset>::infallible(move |_| {
                counter.fetch_add(1, Ordering::SeqCst) + 1
            }),
        );
        let ds = Dataset::new();

        let first = cached.resolve(&ds).expect("first resolve");
        let second = cached.resolve(&ds).expect("second resolve");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cached.name(), "slot_unit_once");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(ds.accessor_slots().is_resolved("slot_unit_once"));
    }

    #[test]
    fn failed_resolve_leaves_slot_unresolved() {
        let cached = CachedAccessor::new(
            "slot_unit_failing",
            AccessorFactory::<Dataset>::new(|_| Err::<u8, _>("not ready")),
        );
        let ds = Dataset::new();

        cached.resolve(&ds).expect_err("failing factory");
        assert!(!ds.accessor_slots().is_resolved("slot_unit_failing"));
    }

    #[test]
    fn cloned_slots_start_empty() {
        let slots = AccessorSlots::new();
        slots
            .slot("geo")
            .set(Arc::new(1_u8))
            .expect("fresh slot should accept a value");
        assert_eq!(slots.resolved_names(), vec!["geo".to_string()]);

        let copy = slots.clone();
        assert!(copy.resolved_names().is_empty());
        assert!(slots.is_resolved("geo"));
    }
}

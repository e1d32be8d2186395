//! Named collection of `DataArray` variables.

use crate::accessor::cached::AccessorSlots;
use crate::accessor::host::HostKind;
use crate::accessor::registry::AccessorTable;
use crate::model::DataArray;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static DATASET_ACCESSORS: AccessorTable<Dataset> = AccessorTable::new();

/// Variables keyed by name, plus dataset-level attributes.
///
/// Variables are data, not attributes of the type: a variable called `geo`
/// does not block registering a `geo` accessor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    variables: BTreeMap<String, DataArray>,
    #[serde(default)]
    attrs: BTreeMap<String, String>,
    #[serde(skip)]
    accessors: AccessorSlots,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a variable, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, variable: DataArray) -> Option<DataArray> {
        self.variables.insert(name.into(), variable)
    }

    /// Builder-style `insert`.
    pub fn with_variable(mut self, name: impl Into<String>, variable: DataArray) -> Self {
        self.insert(name, variable);
        self
    }

    pub fn get(&self, name: &str) -> Option<&DataArray> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Sorted variable names.
    pub fn variable_names(&self) -> Vec<&str> {
        self.variables.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }
}

impl PartialEq for Dataset {
    fn eq(&self, other: &Self) -> bool {
        self.variables == other.variables && self.attrs == other.attrs
    }
}

impl HostKind for Dataset {
    const KIND: &'static str = "Dataset";
    const BUILTIN_ATTRIBUTES: &'static [&'static str] = &[
        "accessors",
        "attrs",
        "contains",
        "default",
        "get",
        "insert",
        "is_empty",
        "len",
        "new",
        "set_attr",
        "variable_names",
        "variables",
        "with_variable",
    ];

    fn accessor_table() -> &'static AccessorTable<Self> {
        &DATASET_ACCESSORS
    }

    fn accessor_slots(&self) -> &AccessorSlots {
        &self.accessors
    }
}

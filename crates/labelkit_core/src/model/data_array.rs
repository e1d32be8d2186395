//! One labeled array of `f64` values.

use crate::accessor::cached::AccessorSlots;
use crate::accessor::host::HostKind;
use crate::accessor::registry::AccessorTable;
use crate::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

static DATA_ARRAY_ACCESSORS: AccessorTable<DataArray> = AccessorTable::new();

/// Labeled values with named dimensions and free-form attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DataArrayRecord", into = "DataArrayRecord")]
pub struct DataArray {
    name: Option<String>,
    dims: Vec<String>,
    values: Vec<f64>,
    attrs: BTreeMap<String, String>,
    accessors: AccessorSlots,
}

/// Serialized shape of `DataArray`.
#[derive(Serialize, Deserialize)]
struct DataArrayRecord {
    name: Option<String>,
    dims: Vec<String>,
    values: Vec<f64>,
    #[serde(default)]
    attrs: BTreeMap<String, String>,
}

impl DataArray {
    /// Creates an unnamed array.
    ///
    /// # Errors
    /// - `DuplicateDimension` when a dimension name repeats.
    pub fn new<I, S>(dims: I, values: Vec<f64>) -> ModelResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();
        let mut seen = BTreeSet::new();
        for dim in &dims {
            if !seen.insert(dim.as_str()) {
                return Err(ModelError::DuplicateDimension(dim.clone()));
            }
        }

        Ok(Self {
            name: None,
            dims,
            values,
            attrs: BTreeMap::new(),
            accessors: AccessorSlots::new(),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Sum of all values; `None` when empty.
    pub fn sum(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum())
    }

    /// Arithmetic mean; `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        self.sum().map(|total| total / self.values.len() as f64)
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }
}

impl PartialEq for DataArray {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.dims == other.dims
            && self.values == other.values
            && self.attrs == other.attrs
    }
}

impl HostKind for DataArray {
    const KIND: &'static str = "DataArray";
    const BUILTIN_ATTRIBUTES: &'static [&'static str] = &[
        "accessors",
        "attrs",
        "dims",
        "is_empty",
        "len",
        "max",
        "mean",
        "min",
        "name",
        "new",
        "set_attr",
        "sum",
        "values",
        "with_name",
    ];

    fn accessor_table() -> &'static AccessorTable<Self> {
        &DATA_ARRAY_ACCESSORS
    }

    fn accessor_slots(&self) -> &AccessorSlots {
        &self.accessors
    }
}

impl TryFrom<DataArrayRecord> for DataArray {
    type Error = ModelError;

    fn try_from(record: DataArrayRecord) -> Result<Self, Self::Error> {
        let mut array = Self::new(record.dims, record.values)?;
        array.name = record.name;
        array.attrs = record.attrs;
        Ok(array)
    }
}

impl From<DataArray> for DataArrayRecord {
    fn from(array: DataArray) -> Self {
        Self {
            name: array.name,
            dims: array.dims,
            values: array.values,
            attrs: array.attrs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DataArray;
    use crate::model::ModelError;

    #[test]
    fn aggregates_return_none_when_empty() {
        let array = DataArray::new(["x"], vec![]).expect("empty array");
        assert!(array.is_empty());
        assert_eq!(array.sum(), None);
        assert_eq!(array.mean(), None);
        assert_eq!(array.min(), None);
        assert_eq!(array.max(), None);
    }

    #[test]
    fn rejects_duplicate_dimension() {
        let err = DataArray::new(["x", "y", "x"], vec![1.0]).expect_err("duplicate dim");
        assert_eq!(err, ModelError::DuplicateDimension("x".to_string()));
    }
}

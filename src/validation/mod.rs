//! Field validation rules
//!
//! Two independent schemas, chosen by the wizard step being submitted:
//! - [`serials`] for the serial number list (step 1)
//! - [`shipping`] for the shipping form (step 3)
//!
//! The review step has no schema.

pub mod serials;
pub mod shipping;

pub use serials::{validate_serials, SerialErrors};
pub use shipping::{validate_shipping, ShippingErrors};

use std::collections::BTreeMap;

/// Field-scoped error messages, at most one per field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<K: Ord> {
    errors: BTreeMap<K, String>,
}

impl<K: Ord> FieldErrors<K> {
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Record `message` for `field` unless it already has one
    pub fn insert(&mut self, field: K, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &K) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &K) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &str)> {
        self.errors.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl<K: Ord> Default for FieldErrors<K> {
    fn default() -> Self {
        Self::new()
    }
}

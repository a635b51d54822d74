//! Validated argument sets.

use crate::error::{Result, ValidationError};
use crate::extract::{extract, FieldSpec};
use crate::value::{FieldValue, Port, WireBool};
use gmp_registry::{EntityField, EventDataField, MethodDataField};
use serde_json::Value;
use std::collections::BTreeMap;

/// Validated entity fields of one request.
pub type ArgumentSet = FieldSet<EntityField>;

/// Validated alert method data.
pub type MethodData = FieldSet<MethodDataField>;

/// Validated alert event data.
pub type EventData = FieldSet<EventDataField>;

/// A mapping from canonical field to validated value.
///
/// Only present fields are stored; a lookup of anything else yields `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet<K: FieldSpec> {
    values: BTreeMap<K, FieldValue>,
}

impl<K: FieldSpec> Default for FieldSet<K> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<K: FieldSpec> FieldSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the listed fields from a request body.
    pub fn extract(body: &Value, fields: &[K]) -> Self {
        let values = fields
            .iter()
            .filter_map(|&field| extract(body, field).map(|value| (field, value)))
            .collect();
        Self { values }
    }

    /// Extract every field of the namespace.
    pub fn extract_all(body: &Value) -> Self {
        Self::extract(body, K::ALL)
    }

    /// Insert a value, replacing any previous one.
    pub fn insert(&mut self, field: K, value: FieldValue) {
        self.values.insert(field, value);
    }

    pub fn get(&self, field: K) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn contains(&self, field: K) -> bool {
        self.values.contains_key(&field)
    }

    pub fn text(&self, field: K) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn flag(&self, field: K) -> Option<WireBool> {
        self.get(field).and_then(FieldValue::as_flag)
    }

    pub fn port(&self, field: K) -> Option<Port> {
        self.get(field).and_then(FieldValue::as_port)
    }

    /// List elements, or an empty slice when the field is absent.
    pub fn list(&self, field: K) -> &[String] {
        self.get(field).and_then(FieldValue::as_list).unwrap_or(&[])
    }

    /// A required text field.
    pub fn require_text(&self, field: K) -> Result<&str> {
        self.text(field).ok_or_else(|| ValidationError::Missing {
            fields: vec![field.canonical_name()],
        })
    }

    /// Fail with every absent field of `required`, in order.
    pub fn ensure_present(&self, required: &[K]) -> Result<()> {
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|field| !self.contains(**field))
            .map(|field| field.canonical_name())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Missing { fields: missing })
        }
    }

    /// Present fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &FieldValue)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }

    /// Canonical names of the present fields.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.values.keys().map(|field| field.canonical_name()).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

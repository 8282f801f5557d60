//! Record trait and a schemaless record implementation
//!
//! A record is one item in a listing (a ship, a rocket, ...). It has a stable
//! string identifier and a set of named scalar attributes. Listing views only
//! ever read records through this trait, so the same engine serves every
//! entity type.

use crate::core::field::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Read-only access to an identified set of named attributes
pub trait Record {
    /// Unique, stable identifier
    fn id(&self) -> &str;

    /// Names of every attribute, in declaration order
    fn attribute_names(&self) -> Vec<&str>;

    /// Get an attribute by name; `None` when the record has no such attribute
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// All attributes with their values, in declaration order
    fn attributes(&self) -> Vec<(&str, FieldValue)> {
        self.attribute_names()
            .into_iter()
            .filter_map(|name| self.field_value(name).map(|value| (name, value)))
            .collect()
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn attribute_names(&self) -> Vec<&str> {
        (**self).attribute_names()
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        (**self).field_value(field)
    }
}

/// A record whose attributes are only known at runtime
///
/// Attribute order follows insertion order. `id` is also exposed as a string
/// attribute, matching how entity models expose it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicRecord {
    pub id: String,
    #[serde(flatten)]
    pub attributes: IndexMap<String, FieldValue>,
}

impl DynamicRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Build a record from a JSON object
    ///
    /// Returns `None` when the value is not an object or has no string `id`.
    /// Nested arrays and objects are skipped.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let id = object.get("id")?.as_str()?.to_string();
        let attributes = object
            .iter()
            .filter(|(name, _)| name.as_str() != "id")
            .filter_map(|(name, v)| FieldValue::from_json(v).map(|fv| (name.clone(), fv)))
            .collect();
        Some(Self { id, attributes })
    }
}

impl Record for DynamicRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn attribute_names(&self) -> Vec<&str> {
        std::iter::once("id")
            .chain(self.attributes.keys().map(String::as_str))
            .collect()
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        if field == "id" {
            return Some(FieldValue::String(self.id.clone()));
        }
        self.attributes.get(field).cloned()
    }
}

//! Flat, schema-driven records
//!
//! A [`Record`] is the unit the store hands out and takes back: a model
//! name, a flat attribute map, and a relation map holding the primary-key
//! sets of many-to-many fields.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use super::schema::ModelSchema;

/// A single persistent record
///
/// Attribute values are plain JSON scalars keyed by field name; relation
/// sets hold the primary keys of related records keyed by many-to-many
/// field name. A record is owned exclusively by the operation mutating it
/// and is reloaded fresh from the store per request.
///
/// # Example
///
/// ```rust
/// use resource_core::store::{ModelSchema, Record};
///
/// let schema = ModelSchema::new("Post").with_field("title");
/// let post = Record::new("Post")
///     .with_attr("id", 1)
///     .with_attr("title", "hello");
///
/// assert_eq!(post.pk(&schema), Some(1));
/// assert_eq!(post.get("title"), Some(&"hello".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    model: String,
    attrs: BTreeMap<String, Value>,
    relations: BTreeMap<String, BTreeSet<i64>>,
}

impl Record {
    /// Create an empty record of the given model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            attrs: BTreeMap::new(),
            relations: BTreeMap::new(),
        }
    }

    /// Builder-style attribute assignment
    #[must_use]
    pub fn with_attr(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(field.into(), value.into());
        self
    }

    /// Builder-style relation assignment
    #[must_use]
    pub fn with_related(mut self, field: impl Into<String>, pks: impl IntoIterator<Item = i64>) -> Self {
        self.relations.insert(field.into(), pks.into_iter().collect());
        self
    }

    /// The model this record belongs to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Read an attribute value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.attrs.get(field)
    }

    /// Set an attribute value
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.attrs.insert(field.into(), value.into());
    }

    /// The flat attribute map
    pub fn attrs(&self) -> &BTreeMap<String, Value> {
        &self.attrs
    }

    /// The primary key, read through the schema's primary-key field
    ///
    /// `None` for unsaved records (the store assigns a key on save).
    pub fn pk(&self, schema: &ModelSchema) -> Option<i64> {
        self.attrs.get(schema.primary_key()).and_then(Value::as_i64)
    }

    /// The relation set of a many-to-many field
    pub fn related(&self, field: &str) -> Option<&BTreeSet<i64>> {
        self.relations.get(field)
    }

    /// Add a primary key to a relation set
    pub fn add_related(&mut self, field: &str, pk: i64) {
        self.relations.entry(field.to_string()).or_default().insert(pk);
    }

    /// Remove a primary key from a relation set
    pub fn remove_related(&mut self, field: &str, pk: i64) {
        if let Some(set) = self.relations.get_mut(field) {
            set.remove(&pk);
        }
    }
}

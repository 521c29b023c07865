//! Flat request payloads
//!
//! A [`Payload`] is the mutable key/value mapping carried by a single
//! request. Foreign-key resolution rewrites slots in place: a scalar
//! primary key becomes a [`FieldValue::Reference`] to the record it named.

use std::collections::BTreeMap;

use serde_json::Value;

/// Framework artifact dropped during flattening; never business data.
pub const CSRF_TOKEN_FIELD: &str = "csrfmiddlewaretoken";

/// One payload slot: a raw scalar or a resolved record reference
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// An unresolved scalar value as supplied by the client
    Scalar(Value),
    /// A resolved reference to an existing record
    Reference {
        /// The referenced model
        model: String,
        /// The referenced record's primary key
        pk: i64,
    },
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Scalar(Value::from(s))
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Scalar(Value::from(s))
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Scalar(Value::from(n))
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Scalar(Value::from(n))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Scalar(Value::from(b))
    }
}

/// Mutable flat mapping from field name to value, scoped to one operation
///
/// # Example
///
/// ```rust
/// use resource_core::handlers::Payload;
///
/// let mut payload = Payload::new();
/// payload.insert("title", "hello");
/// payload.insert("author", "3");
/// assert_eq!(payload.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    entries: BTreeMap<String, FieldValue>,
}

impl Payload {
    /// Create an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.entries.insert(field.into(), value.into());
    }

    /// Builder-style field assignment
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Read a field value
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.entries.get(field)
    }

    /// Remove a field, returning its value
    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.entries.remove(field)
    }

    /// Whether the field is present
    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the payload has no fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten into a plain attribute map for persistence
    ///
    /// Resolved references collapse to their primary key; the CSRF token
    /// field is dropped as a framework artifact.
    pub fn flatten(&self) -> BTreeMap<String, Value> {
        self.entries
            .iter()
            .filter(|(field, _)| field.as_str() != CSRF_TOKEN_FIELD)
            .map(|(field, value)| {
                let flat = match value {
                    FieldValue::Scalar(v) => v.clone(),
                    FieldValue::Reference { pk, .. } => Value::from(*pk),
                };
                (field.clone(), flat)
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_insert_get_remove() {
        let mut payload = Payload::new();
        assert!(payload.is_empty());

        payload.insert("title", "hello");
        assert!(payload.contains("title"));
        assert_eq!(payload.get("title"), Some(&FieldValue::Scalar("hello".into())));

        assert!(payload.remove("title").is_some());
        assert!(payload.remove("title").is_none());
        assert!(payload.is_empty());
    }

    #[test]
    fn test_flatten_collapses_references() {
        let payload = Payload::new().with("title", "hello").with(
            "author",
            FieldValue::Reference {
                model: "Author".to_string(),
                pk: 3,
            },
        );

        let flat = payload.flatten();
        assert_eq!(flat.get("title"), Some(&"hello".into()));
        assert_eq!(flat.get("author"), Some(&3.into()));
    }

    #[test]
    fn test_flatten_drops_csrf_token() {
        let payload = Payload::new()
            .with("title", "hello")
            .with(CSRF_TOKEN_FIELD, "tok3n");

        let flat = payload.flatten();
        assert_eq!(flat.len(), 1);
        assert!(!flat.contains_key(CSRF_TOKEN_FIELD));
    }

    #[test]
    fn test_from_iterator() {
        let payload: Payload = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(payload.len(), 2);
    }
}

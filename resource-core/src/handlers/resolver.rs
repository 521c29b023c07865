//! Relational field resolution for flat payloads
//!
//! Clients send relationships as flat scalars: a foreign key arrives as a
//! primary-key string, a many-to-many mutation as a comma-separated id
//! list under a reserved `<field>__add` / `<field>__remove` key. Before
//! anything touches persistence, [`resolve_extras`] normalizes the payload
//! against the model's declared relational fields.
//!
//! Resolution is single-shot per operation: directive keys are consumed
//! out of the payload as they are applied.

use serde_json::Value;

use crate::store::{FilterCondition, ForeignKeyField, ManyToManyField, ModelSchema, Record, Store};

use super::error::ResolveError;
use super::payload::{FieldValue, Payload};
use super::request::Request;

/// Resolve every relational field in the request payload
///
/// For each declared foreign-key field present in the payload, the scalar
/// primary key is replaced in place by a resolved record reference;
/// resolution aborts at the first key that names no existing record, and
/// the payload is never partially resolved past that point.
///
/// Many-to-many directives apply only when an existing instance is bound
/// (the update path): on create the instance does not yet exist to hold a
/// relation set.
///
/// A request without a payload is a no-op success.
pub fn resolve_extras(
    store: &dyn Store,
    schema: &ModelSchema,
    request: &mut Request,
    instance: Option<&mut Record>,
) -> Result<(), ResolveError> {
    let Some(payload) = request.data.as_mut() else {
        return Ok(());
    };

    for field in schema.foreign_keys() {
        resolve_foreign_key(store, payload, field)?;
    }

    if let Some(instance) = instance {
        for field in schema.many_to_many() {
            apply_many_to_many(store, payload, instance, field);
        }
    }

    Ok(())
}

/// Replace a scalar primary key with a resolved record reference
///
/// Absent fields are skipped; already-resolved references are left alone.
fn resolve_foreign_key(
    store: &dyn Store,
    payload: &mut Payload,
    field: &ForeignKeyField,
) -> Result<(), ResolveError> {
    let key = match payload.get(&field.name) {
        None | Some(FieldValue::Reference { .. }) => return Ok(()),
        Some(FieldValue::Scalar(value)) => render_key(value),
    };
    let pk = parse_pk(&key).ok_or_else(|| ResolveError::new(&field.references, &key))?;

    if fetch_referenced(store, &field.references, pk).is_none() {
        return Err(ResolveError::new(&field.references, &key));
    }
    payload.insert(
        field.name.clone(),
        FieldValue::Reference {
            model: field.references.clone(),
            pk,
        },
    );
    Ok(())
}

/// Apply an add/remove directive to an instance's relation set
///
/// `__remove` takes precedence: when both directives are present for the
/// same field, the stale `__add` is discarded unapplied. Referenced
/// records that do not exist are skipped silently, as are tokens that do
/// not parse as integers. Consumed directive keys are deleted from the
/// payload.
fn apply_many_to_many(
    store: &dyn Store,
    payload: &mut Payload,
    instance: &mut Record,
    field: &ManyToManyField,
) {
    let remove_key = format!("{}__remove", field.name);
    let add_key = format!("{}__add", field.name);

    if let Some(value) = payload.remove(&remove_key) {
        payload.remove(&add_key);
        for pk in parse_pk_list(&value) {
            if fetch_referenced(store, &field.references, pk).is_some() {
                instance.remove_related(&field.name, pk);
            }
        }
    } else if let Some(value) = payload.remove(&add_key) {
        for pk in parse_pk_list(&value) {
            if fetch_referenced(store, &field.references, pk).is_some() {
                instance.add_related(&field.name, pk);
            }
        }
    }
}

fn fetch_referenced(store: &dyn Store, model: &str, pk: i64) -> Option<Record> {
    let schema = store.schema(model)?;
    store
        .get(model, &[FilterCondition::eq(schema.primary_key(), pk)])
        .ok()
}

fn render_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_pk(key: &str) -> Option<i64> {
    key.trim().parse().ok()
}

fn parse_pk_list(value: &FieldValue) -> Vec<i64> {
    match value {
        FieldValue::Scalar(Value::String(list)) => {
            list.split(',').filter_map(|token| parse_pk(token)).collect()
        }
        FieldValue::Scalar(Value::Number(n)) => n.as_i64().into_iter().collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn store() -> MemoryStore {
        let store = MemoryStore::new(vec![
            ModelSchema::new("Post")
                .with_field("title")
                .with_foreign_key("author", "Author")
                .with_many_to_many("tags", "Tag"),
            ModelSchema::new("Author").with_field("name"),
            ModelSchema::new("Tag").with_field("label"),
        ]);
        store.save(Record::new("Author").with_attr("name", "ann"));
        store.save(Record::new("Tag").with_attr("label", "rust"));
        store.save(Record::new("Tag").with_attr("label", "web"));
        store
    }

    fn post_schema(store: &MemoryStore) -> ModelSchema {
        store.schema("Post").unwrap().clone()
    }

    #[test]
    fn test_foreign_key_resolves_in_place() {
        let store = store();
        let schema = post_schema(&store);
        let mut request = Request::new().with_data(Payload::new().with("author", "1"));

        resolve_extras(&store, &schema, &mut request, None).unwrap();

        let payload = request.data.unwrap();
        assert_eq!(
            payload.get("author"),
            Some(&FieldValue::Reference {
                model: "Author".to_string(),
                pk: 1
            })
        );
    }

    #[test]
    fn test_unknown_foreign_key_aborts_with_message() {
        let store = store();
        let schema = post_schema(&store);
        let mut request = Request::new().with_data(Payload::new().with("author", "99"));

        let error = resolve_extras(&store, &schema, &mut request, None).unwrap_err();
        assert_eq!(error.to_string(), "Author with primary key \"99\" not found.");
        // the failing slot keeps its raw scalar; nothing was half-resolved
        let payload = request.data.unwrap();
        assert_eq!(payload.get("author"), Some(&FieldValue::Scalar("99".into())));
    }

    #[test]
    fn test_non_numeric_foreign_key_is_a_resolution_failure() {
        let store = store();
        let schema = post_schema(&store);
        let mut request = Request::new().with_data(Payload::new().with("author", "abc"));

        let error = resolve_extras(&store, &schema, &mut request, None).unwrap_err();
        assert_eq!(error.key, "abc");
    }

    #[test]
    fn test_absent_foreign_key_field_is_skipped() {
        let store = store();
        let schema = post_schema(&store);
        let mut request = Request::new().with_data(Payload::new().with("title", "hi"));

        resolve_extras(&store, &schema, &mut request, None).unwrap();
        assert_eq!(
            request.data.unwrap().get("title"),
            Some(&FieldValue::Scalar("hi".into()))
        );
    }

    #[test]
    fn test_missing_payload_is_noop() {
        let store = store();
        let schema = post_schema(&store);
        let mut request = Request::new();
        resolve_extras(&store, &schema, &mut request, None).unwrap();
        assert!(request.data.is_none());
    }

    #[test]
    fn test_m2m_add_applies_and_consumes_directive() {
        let store = store();
        let schema = post_schema(&store);
        let mut instance = store.save(Record::new("Post").with_attr("title", "p"));
        let mut request = Request::new().with_data(Payload::new().with("tags__add", "1,2"));

        resolve_extras(&store, &schema, &mut request, Some(&mut instance)).unwrap();

        let tags = instance.related("tags").unwrap();
        assert!(tags.contains(&1) && tags.contains(&2));
        assert!(!request.data.unwrap().contains("tags__add"));
    }

    #[test]
    fn test_m2m_remove_applies_and_consumes_directive() {
        let store = store();
        let schema = post_schema(&store);
        let mut instance = store.save(
            Record::new("Post")
                .with_attr("title", "p")
                .with_related("tags", [1, 2]),
        );
        let mut request = Request::new().with_data(Payload::new().with("tags__remove", "1"));

        resolve_extras(&store, &schema, &mut request, Some(&mut instance)).unwrap();

        let tags = instance.related("tags").unwrap();
        assert!(!tags.contains(&1));
        assert!(tags.contains(&2));
        assert!(!request.data.unwrap().contains("tags__remove"));
    }

    #[test]
    fn test_m2m_remove_wins_over_add() {
        let store = store();
        let schema = post_schema(&store);
        let mut instance = store.save(
            Record::new("Post")
                .with_attr("title", "p")
                .with_related("tags", [1]),
        );
        let mut request = Request::new().with_data(
            Payload::new()
                .with("tags__remove", "1")
                .with("tags__add", "2"),
        );

        resolve_extras(&store, &schema, &mut request, Some(&mut instance)).unwrap();

        let tags = instance.related("tags").unwrap();
        assert!(tags.is_empty());
        let payload = request.data.unwrap();
        assert!(!payload.contains("tags__remove"));
        assert!(!payload.contains("tags__add"));
    }

    #[test]
    fn test_m2m_nonexistent_and_malformed_pks_are_skipped() {
        let store = store();
        let schema = post_schema(&store);
        let mut instance = store.save(Record::new("Post").with_attr("title", "p"));
        let mut request =
            Request::new().with_data(Payload::new().with("tags__add", "1, 99, x, 2"));

        resolve_extras(&store, &schema, &mut request, Some(&mut instance)).unwrap();

        let tags = instance.related("tags").unwrap();
        assert_eq!(tags.len(), 2);
        assert!(tags.contains(&1) && tags.contains(&2));
    }

    #[test]
    fn test_m2m_ignored_without_instance() {
        let store = store();
        let schema = post_schema(&store);
        let mut request = Request::new().with_data(Payload::new().with("tags__add", "1"));

        resolve_extras(&store, &schema, &mut request, None).unwrap();
        // create path: directive is left untouched, nothing to mutate yet
        assert!(request.data.unwrap().contains("tags__add"));
    }
}

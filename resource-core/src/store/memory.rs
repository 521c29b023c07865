//! In-memory store implementation
//!
//! The reference [`Store`] backend: schemas fixed at construction, records
//! behind an `RwLock`, integer primary keys assigned on save. Used by the
//! test suite and by consumers that want CRUD handlers without a real
//! persistence engine.
//!
//! # Example
//!
//! ```rust
//! use resource_core::store::{MemoryStore, ModelSchema, Record, Store};
//!
//! let store = MemoryStore::new(vec![ModelSchema::new("User").with_field("name")]);
//! let saved = store.save(Record::new("User").with_attr("name", "ann"));
//! assert_eq!(saved.get("id"), Some(&1.into()));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use super::error::LookupError;
use super::query::FilterCondition;
use super::record::Record;
use super::schema::ModelSchema;
use super::traits::Store;

#[derive(Default)]
struct Shelves {
    // model name -> pk -> record
    records: HashMap<String, BTreeMap<i64, Record>>,
    counters: HashMap<String, i64>,
}

/// Thread-safe in-memory persistence engine
pub struct MemoryStore {
    schemas: HashMap<String, ModelSchema>,
    shelves: RwLock<Shelves>,
}

impl MemoryStore {
    /// Create a store knowing the given schemas
    pub fn new(schemas: impl IntoIterator<Item = ModelSchema>) -> Self {
        Self {
            schemas: schemas
                .into_iter()
                .map(|s| (s.name().to_string(), s))
                .collect(),
            shelves: RwLock::new(Shelves::default()),
        }
    }

    fn matching(shelf: &BTreeMap<i64, Record>, conditions: &[FilterCondition]) -> Vec<Record> {
        shelf
            .values()
            .filter(|record| conditions.iter().all(|c| c.matches(record)))
            .cloned()
            .collect()
    }
}

impl Store for MemoryStore {
    fn schema(&self, model: &str) -> Option<&ModelSchema> {
        self.schemas.get(model)
    }

    fn get(&self, model: &str, conditions: &[FilterCondition]) -> Result<Record, LookupError> {
        let shelves = self.shelves.read().expect("store lock poisoned");
        let matched = shelves
            .records
            .get(model)
            .map(|shelf| Self::matching(shelf, conditions))
            .unwrap_or_default();
        match matched.len() {
            0 => Err(LookupError::not_found(model)),
            1 => Ok(matched.into_iter().next().expect("one match")),
            n => Err(LookupError::multiple_found(model, n)),
        }
    }

    fn filter<'a>(
        &'a self,
        model: &str,
        conditions: &[FilterCondition],
    ) -> Box<dyn Iterator<Item = Record> + 'a> {
        let shelves = self.shelves.read().expect("store lock poisoned");
        let matched = shelves
            .records
            .get(model)
            .map(|shelf| Self::matching(shelf, conditions))
            .unwrap_or_default();
        Box::new(matched.into_iter())
    }

    fn save(&self, mut record: Record) -> Record {
        let Some(schema) = self.schemas.get(record.model()) else {
            tracing::warn!(model = record.model(), "save for unknown model ignored");
            return record;
        };
        let mut shelves = self.shelves.write().expect("store lock poisoned");
        let pk = match record.pk(schema) {
            Some(pk) => pk,
            None => {
                let counter = shelves.counters.entry(schema.name().to_string()).or_insert(0);
                *counter += 1;
                let pk = *counter;
                record.set(schema.primary_key(), pk);
                pk
            }
        };
        // keep the counter ahead of explicitly assigned keys
        let counter = shelves.counters.entry(schema.name().to_string()).or_insert(0);
        *counter = (*counter).max(pk);
        shelves
            .records
            .entry(schema.name().to_string())
            .or_default()
            .insert(pk, record.clone());
        record
    }

    fn delete(&self, record: &Record) -> bool {
        let Some(schema) = self.schemas.get(record.model()) else {
            return false;
        };
        let Some(pk) = record.pk(schema) else {
            return false;
        };
        let mut shelves = self.shelves.write().expect("store lock poisoned");
        shelves
            .records
            .get_mut(record.model())
            .is_some_and(|shelf| shelf.remove(&pk).is_some())
    }
}

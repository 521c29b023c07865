//! Persistence seam: schemas, records, query scopes, and the store trait
//!
//! This module defines everything the CRUD core consumes from the
//! persistence engine, behind the object-safe [`Store`] trait:
//!
//! - **Schema introspection**: [`ModelSchema`] with its foreign-key and
//!   many-to-many field declarations
//! - **Records**: [`Record`], a flat schema-driven attribute map
//! - **Queries**: [`FilterCondition`] predicates, [`QueryScope`] visibility
//!   views, and lazy restartable [`RecordSet`] sequences
//! - **Reference backend**: [`MemoryStore`], an in-process implementation
//!
//! # Example
//!
//! ```rust
//! use resource_core::store::{FilterCondition, MemoryStore, ModelSchema, Record, Store};
//!
//! let store = MemoryStore::new(vec![ModelSchema::new("User").with_field("name")]);
//! store.save(Record::new("User").with_attr("name", "ann"));
//!
//! let ann = store.get("User", &[FilterCondition::eq("name", "ann")]).unwrap();
//! assert_eq!(ann.get("id"), Some(&1.into()));
//! ```

mod error;
mod memory;
mod query;
mod record;
mod schema;
mod traits;

// Re-export all public types
pub use error::{LookupError, LookupErrorKind};
pub use memory::MemoryStore;
pub use query::{FilterCondition, FilterOperator, QueryScope, RecordSet};
pub use record::Record;
pub use schema::{ForeignKeyField, ManyToManyField, ModelSchema};
pub use traits::Store;

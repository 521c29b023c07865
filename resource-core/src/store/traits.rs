//! The persistence collaborator seam
//!
//! [`Store`] is the interface this crate consumes from whatever actually
//! persists records. Calls are synchronous and blocking from this crate's
//! viewpoint; implementations own their locking and may be shared across
//! request-serving threads.

use super::error::LookupError;
use super::query::FilterCondition;
use super::record::Record;
use super::schema::ModelSchema;

/// Synchronous persistence engine interface
///
/// Object-safe by design: handlers hold `&dyn Store` so that query scopes
/// and outcomes do not carry the backend type. The crate ships
/// [`MemoryStore`](super::MemoryStore) as the reference implementation.
pub trait Store: Send + Sync {
    /// Schema introspection for a model, if the store knows it
    fn schema(&self, model: &str) -> Option<&ModelSchema>;

    /// Fetch exactly one record matching all conditions
    ///
    /// Zero matches is [`LookupErrorKind::NotFound`]; more than one is
    /// [`LookupErrorKind::MultipleFound`].
    ///
    /// [`LookupErrorKind::NotFound`]: super::LookupErrorKind::NotFound
    /// [`LookupErrorKind::MultipleFound`]: super::LookupErrorKind::MultipleFound
    fn get(&self, model: &str, conditions: &[FilterCondition]) -> Result<Record, LookupError>;

    /// Lazily iterate the records matching all conditions
    fn filter<'a>(
        &'a self,
        model: &str,
        conditions: &[FilterCondition],
    ) -> Box<dyn Iterator<Item = Record> + 'a>;

    /// Lazily iterate every record of a model
    fn all<'a>(&'a self, model: &str) -> Box<dyn Iterator<Item = Record> + 'a> {
        self.filter(model, &[])
    }

    /// Persist a record, assigning a primary key if it has none
    ///
    /// Returns the record as persisted.
    fn save(&self, record: Record) -> Record;

    /// Remove a record; `true` if something was deleted
    fn delete(&self, record: &Record) -> bool;
}

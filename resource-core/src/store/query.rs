//! Filter conditions and query scopes
//!
//! [`FilterCondition`] is the predicate vocabulary for record lookups.
//! [`QueryScope`] is the (possibly restricted) view of a model's records a
//! handler is allowed to see; all scoped reads go through it.
//!
//! # Example
//!
//! ```rust
//! use resource_core::store::FilterCondition;
//!
//! let status_filter = FilterCondition::eq("status", "active");
//! let age_filter = FilterCondition::gt("age", 18);
//! ```

use std::fmt;

use serde_json::Value;

use super::error::LookupError;
use super::record::Record;
use super::schema::ModelSchema;
use super::traits::Store;

/// Comparison operators for filter conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal to (=)
    Equal,
    /// Not equal to (!=)
    NotEqual,
    /// Greater than (>)
    GreaterThan,
    /// Less than (<)
    LessThan,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::NotEqual => write!(f, "!="),
            Self::GreaterThan => write!(f, ">"),
            Self::LessThan => write!(f, "<"),
        }
    }
}

/// A single filter condition for querying records
///
/// # Example
///
/// ```rust
/// use resource_core::store::FilterCondition;
///
/// let filter = FilterCondition::eq("status", "active");
/// assert_eq!(filter.field, "status");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    /// The field name to filter on
    pub field: String,
    /// The comparison operator
    pub operator: FilterOperator,
    /// The value to compare against
    pub value: Value,
}

impl FilterCondition {
    /// Create a new filter condition
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Create an equality filter (field = value)
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::Equal, value)
    }

    /// Create a not-equal filter (field != value)
    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::NotEqual, value)
    }

    /// Create a greater-than filter (field > value)
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::GreaterThan, value)
    }

    /// Create a less-than filter (field < value)
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::LessThan, value)
    }

    /// Evaluate this condition against a record's attributes
    ///
    /// A record without the field never matches, regardless of operator.
    /// Numbers compare numerically so that an `i64` condition matches a
    /// stored `u64`/`f64` attribute with the same value.
    pub fn matches(&self, record: &Record) -> bool {
        let Some(actual) = record.get(&self.field) else {
            return false;
        };
        match self.operator {
            FilterOperator::Equal => values_equal(actual, &self.value),
            FilterOperator::NotEqual => !values_equal(actual, &self.value),
            FilterOperator::GreaterThan => compare(actual, &self.value)
                .is_some_and(|ord| ord == std::cmp::Ordering::Greater),
            FilterOperator::LessThan => {
                compare(actual, &self.value).is_some_and(|ord| ord == std::cmp::Ordering::Less)
            }
        }
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x == y;
    }
    a == b
}

fn compare(a: &Value, b: &Value) -> Option<std::cmp::Ordering> {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x.partial_cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_str(), b.as_str()) {
        return Some(x.cmp(y));
    }
    None
}

/// The view of a model's records a request is allowed to see
///
/// A scope carries a base restriction merged into every lookup, so a
/// handler can narrow visibility (for example to the requesting user's
/// rows) without its CRUD operations knowing.
///
/// # Example
///
/// ```rust,ignore
/// let scope = QueryScope::restricted(
///     store,
///     schema,
///     vec![FilterCondition::eq("owner", user_id)],
/// );
/// let mine = scope.all();
/// ```
#[derive(Clone, Copy)]
pub struct QueryScope<'a> {
    store: &'a dyn Store,
    schema: &'a ModelSchema,
    restriction: &'a [FilterCondition],
}

impl<'a> QueryScope<'a> {
    /// A scope over every record of the model
    pub fn new(store: &'a dyn Store, schema: &'a ModelSchema) -> Self {
        Self {
            store,
            schema,
            restriction: &[],
        }
    }

    /// A scope restricted by base conditions merged into every lookup
    pub fn restricted(
        store: &'a dyn Store,
        schema: &'a ModelSchema,
        restriction: &'a [FilterCondition],
    ) -> Self {
        Self {
            store,
            schema,
            restriction,
        }
    }

    /// The schema of the scoped model
    pub fn schema(&self) -> &'a ModelSchema {
        self.schema
    }

    fn merged(&self, conditions: &[FilterCondition]) -> Vec<FilterCondition> {
        let mut all = self.restriction.to_vec();
        all.extend_from_slice(conditions);
        all
    }

    /// Fetch exactly one record matching the conditions
    pub fn get(&self, conditions: &[FilterCondition]) -> Result<Record, LookupError> {
        self.store.get(self.schema.name(), &self.merged(conditions))
    }

    /// Fetch exactly one record by primary key
    pub fn get_by_pk(&self, pk: i64) -> Result<Record, LookupError> {
        self.get(&[FilterCondition::eq(self.schema.primary_key(), pk)])
    }

    /// A lazy sequence of the records matching the conditions
    pub fn filter(&self, conditions: &[FilterCondition]) -> RecordSet<'a> {
        RecordSet {
            store: self.store,
            model: self.schema.name().to_string(),
            conditions: self.merged(conditions),
        }
    }

    /// A lazy sequence of every record visible in this scope
    pub fn all(&self) -> RecordSet<'a> {
        self.filter(&[])
    }
}

/// A lazy, restartable sequence of records
///
/// Nothing is fetched until [`RecordSet::iter`] is called; each call
/// re-runs the query against the store, so the sequence is restartable
/// per call and reflects the store's state at iteration time.
pub struct RecordSet<'a> {
    store: &'a dyn Store,
    model: String,
    conditions: Vec<FilterCondition>,
}

impl RecordSet<'_> {
    /// Iterate the matching records
    pub fn iter(&self) -> Box<dyn Iterator<Item = Record> + '_> {
        self.store.filter(&self.model, &self.conditions)
    }

    /// Collect the matching records into a vector
    pub fn to_vec(&self) -> Vec<Record> {
        self.iter().collect()
    }

    /// Count the matching records
    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

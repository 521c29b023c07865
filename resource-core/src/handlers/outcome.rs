//! The standardized result vocabulary
//!
//! Every CRUD operation ends in an [`Outcome`]: a record, a lazy record
//! collection, a bare [`Status`] signal, or a bad-request condition with a
//! descriptive message. An external response layer renders these; this
//! crate only guarantees it emits the right one.

use std::fmt;

use crate::store::{Record, RecordSet};

/// Bare status signals produced by CRUD operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The handler is not bound to a model, so the verb is unavailable
    NotImplemented,
    /// A primary-key lookup matched nothing
    NotFound,
    /// A delete target matched nothing
    NotHere,
    /// The request is malformed or a primary-key lookup was ambiguous
    BadRequest,
    /// Create matched an identical existing record, or a delete target was ambiguous
    DuplicateEntry,
    /// The record was deleted
    Deleted,
    /// The update was applied
    AllOk,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotImplemented => write!(f, "not_implemented"),
            Self::NotFound => write!(f, "not_found"),
            Self::NotHere => write!(f, "not_here"),
            Self::BadRequest => write!(f, "bad_request"),
            Self::DuplicateEntry => write!(f, "duplicate_entry"),
            Self::Deleted => write!(f, "deleted"),
            Self::AllOk => write!(f, "all_ok"),
        }
    }
}

/// The result of a CRUD operation
///
/// The lifetime ties lazy collections to the handler's store borrow; all
/// other variants are owned.
pub enum Outcome<'a> {
    /// A single persisted record (create success, read-by-pk success)
    Record(Record),
    /// A lazy sequence of records (read-list success)
    Collection(RecordSet<'a>),
    /// A bare status signal
    Status(Status),
    /// A bad-request condition with a descriptive message
    Invalid(String),
}

impl Outcome<'_> {
    /// The status signal, if this outcome is one
    pub fn status(&self) -> Option<Status> {
        match self {
            Self::Status(status) => Some(*status),
            _ => None,
        }
    }

    /// The record, if this outcome carries one
    pub fn record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// The invalid-request message, if this outcome carries one
    pub fn invalid_message(&self) -> Option<&str> {
        match self {
            Self::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

impl fmt::Debug for Outcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(record) => f.debug_tuple("Record").field(record).finish(),
            Self::Collection(_) => f.write_str("Collection(..)"),
            Self::Status(status) => f.debug_tuple("Status").field(status).finish(),
            Self::Invalid(message) => f.debug_tuple("Invalid").field(message).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", Status::NotImplemented), "not_implemented");
        assert_eq!(format!("{}", Status::NotFound), "not_found");
        assert_eq!(format!("{}", Status::NotHere), "not_here");
        assert_eq!(format!("{}", Status::BadRequest), "bad_request");
        assert_eq!(format!("{}", Status::DuplicateEntry), "duplicate_entry");
        assert_eq!(format!("{}", Status::Deleted), "deleted");
        assert_eq!(format!("{}", Status::AllOk), "all_ok");
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = Outcome::Status(Status::AllOk);
        assert_eq!(outcome.status(), Some(Status::AllOk));
        assert!(outcome.record().is_none());

        let outcome = Outcome::Record(Record::new("Post"));
        assert!(outcome.status().is_none());
        assert_eq!(outcome.record().unwrap().model(), "Post");

        let outcome = Outcome::Invalid("bad field".to_string());
        assert_eq!(outcome.invalid_message(), Some("bad field"));
    }
}

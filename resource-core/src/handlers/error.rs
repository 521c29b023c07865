//! Handler-level error types
//!
//! Two distinct failure channels live here. [`ResolveError`] is a request
//! error: a relational reference in the payload named a record that does
//! not exist, surfaced to the client as a bad-request condition.
//! [`HandlerFault`] is a programming error: the service was wired up with
//! a handler that cannot satisfy the operation at all, and no request
//! retry can fix it.

use std::fmt;

use thiserror::Error;

/// A foreign-key reference in the payload failed to resolve
///
/// Carries the referenced model's name and the attempted key. The message
/// is client-facing and rendered into the bad-request outcome.
///
/// # Example
///
/// ```rust
/// use resource_core::handlers::ResolveError;
///
/// let error = ResolveError::new("Author", "7");
/// assert_eq!(error.to_string(), "Author with primary key \"7\" not found.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveError {
    /// The referenced model that was looked up
    pub model: String,
    /// The primary key the payload supplied
    pub key: String,
}

impl ResolveError {
    /// Create a resolution error for the given model and attempted key
    pub fn new(model: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with primary key \"{}\" not found.", self.model, self.key)
    }
}

impl std::error::Error for ResolveError {}

/// Fatal handler misconfiguration
///
/// Distinct from the `NotImplemented` status signal: a request error can
/// be answered, a fault cannot. Delete on an unbound handler raises this
/// rather than signalling; reaching a destructive verb with no model is
/// treated as a wiring bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerFault {
    /// The handler has neither a model binding nor a query-scope override
    #[error("handler `{handler}` is not bound to a model or query scope")]
    UnboundModel {
        /// The offending handler's registered name
        handler: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_message() {
        let error = ResolveError::new("Author", "42");
        assert_eq!(error.to_string(), "Author with primary key \"42\" not found.");
    }

    #[test]
    fn test_handler_fault_display() {
        let fault = HandlerFault::UnboundModel {
            handler: "notes".to_string(),
        };
        assert!(fault.to_string().contains("`notes`"));
    }

    #[test]
    fn test_errors_implement_error_trait() {
        let resolve: Box<dyn std::error::Error> = Box::new(ResolveError::new("Tag", "1"));
        assert!(resolve.to_string().contains("Tag"));

        let fault: Box<dyn std::error::Error> = Box::new(HandlerFault::UnboundModel {
            handler: "notes".to_string(),
        });
        assert!(fault.to_string().contains("not bound"));
    }
}

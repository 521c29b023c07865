//! Store lookup error types
//!
//! A single-record lookup can fail two ways: no record matched, or more
//! than one did. Callers branch on [`LookupErrorKind`] to map each case to
//! its own outcome.
//!
//! # Example
//!
//! ```rust
//! use resource_core::store::{LookupError, LookupErrorKind};
//!
//! let error = LookupError::not_found("User");
//! assert!(matches!(error.kind, LookupErrorKind::NotFound));
//! ```

use std::fmt;

/// Category of single-record lookup failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupErrorKind {
    /// No record matched the conditions
    NotFound,
    /// More than one record matched the conditions
    MultipleFound,
}

impl fmt::Display for LookupErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::MultipleFound => write!(f, "multiple_found"),
        }
    }
}

/// Structured lookup error with model context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    /// The category of failure
    pub kind: LookupErrorKind,
    /// The model being queried
    pub model: String,
    /// Human-readable error message
    pub message: String,
}

impl LookupError {
    /// Create a "not found" error for the given model
    pub fn not_found(model: impl Into<String>) -> Self {
        Self {
            kind: LookupErrorKind::NotFound,
            model: model.into(),
            message: "no record matched".to_string(),
        }
    }

    /// Create a "multiple found" error for the given model
    pub fn multiple_found(model: impl Into<String>, matched: usize) -> Self {
        Self {
            kind: LookupErrorKind::MultipleFound,
            model: model.into(),
            message: format!("{matched} records matched a single-record lookup"),
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lookup {} error [{}]: {}", self.kind, self.model, self.message)
    }
}

impl std::error::Error for LookupError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_kind_display() {
        assert_eq!(format!("{}", LookupErrorKind::NotFound), "not_found");
        assert_eq!(format!("{}", LookupErrorKind::MultipleFound), "multiple_found");
    }

    #[test]
    fn test_not_found_convenience() {
        let error = LookupError::not_found("User");
        assert_eq!(error.kind, LookupErrorKind::NotFound);
        assert_eq!(error.model, "User");
    }

    #[test]
    fn test_multiple_found_convenience() {
        let error = LookupError::multiple_found("User", 3);
        assert_eq!(error.kind, LookupErrorKind::MultipleFound);
        assert!(error.message.contains('3'));
    }

    #[test]
    fn test_display_includes_model() {
        let display = format!("{}", LookupError::not_found("Order"));
        assert!(display.contains("not_found"));
        assert!(display.contains("[Order]"));
    }

    #[test]
    fn test_error_is_error_trait() {
        let error: Box<dyn std::error::Error> = Box::new(LookupError::not_found("User"));
        assert!(error.to_string().contains("not_found"));
    }
}

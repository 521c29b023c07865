//! The transport collaborator surface
//!
//! Routing, parsing, and authentication live outside this crate; what a
//! handler sees is a [`Request`]: an optional mutable payload plus the
//! keyword parameters the router extracted from the URL.

use std::collections::BTreeMap;

use super::payload::Payload;

/// A single inbound request as this core sees it
///
/// The payload is mutated in place during relational resolution and is
/// scoped to one operation. Parameters are where a primary-key keyword
/// arrives for single-record reads, updates, and deletes.
///
/// # Example
///
/// ```rust
/// use resource_core::handlers::{Payload, Request};
///
/// let request = Request::new()
///     .with_data(Payload::new().with("title", "hello"))
///     .with_param("id", "7");
/// assert_eq!(request.param("id"), Some("7"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// The flat request payload, absent for bodyless verbs
    pub data: Option<Payload>,
    /// Keyword routing parameters extracted from the URL
    pub params: BTreeMap<String, String>,
}

impl Request {
    /// Create a bodyless request with no parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a payload
    #[must_use]
    pub fn with_data(mut self, data: Payload) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach a routing parameter
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Read a routing parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builders() {
        let request = Request::new()
            .with_data(Payload::new().with("a", 1))
            .with_param("id", "7");

        assert!(request.data.is_some());
        assert_eq!(request.param("id"), Some("7"));
        assert_eq!(request.param("missing"), None);
    }

    #[test]
    fn test_default_request_is_bodyless() {
        let request = Request::new();
        assert!(request.data.is_none());
        assert!(request.params.is_empty());
    }
}

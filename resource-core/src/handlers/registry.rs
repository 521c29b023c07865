//! Handler registry: the process-wide handler-to-model table
//!
//! Application setup code registers every handler binding explicitly
//! during single-threaded startup; the registry is read-only once serving
//! begins. It exists for introspection (which handler serves which model)
//! and to flag accidental double-binding of a (model, anonymity) pair.

use std::collections::HashMap;

use super::traits::HandlerBinding;

/// Registered name of the built-in base binding
pub const BASE_HANDLER: &str = "base";
/// Registered name of the built-in anonymous base binding
pub const ANONYMOUS_BASE_HANDLER: &str = "anonymous_base";

/// What the registry remembers about one handler binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// The bound model, if any
    pub model: Option<String>,
    /// Whether the handler serves anonymous access
    pub is_anonymous: bool,
}

/// Explicit, injectable handler registry
///
/// Registering two handlers for the same (model, anonymity) pair is a
/// non-fatal warning: intentional overrides are allowed, and the warning
/// can be suppressed by configuration. Both entries stay queryable under
/// their own names; only a same-named registration overwrites.
///
/// # Example
///
/// ```rust
/// use resource_core::handlers::{HandlerBinding, HandlerRegistry};
///
/// let mut registry = HandlerRegistry::new();
/// registry.register(&HandlerBinding::new("notes", "Note"));
/// assert!(registry.lookup("notes").is_some());
/// ```
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    ignore_duplicate_bindings: bool,
    entries: HashMap<String, RegistryEntry>,
    tracker: Vec<String>,
}

impl HandlerRegistry {
    /// Create a registry that warns on duplicate bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry, optionally suppressing duplicate-binding warnings
    pub fn with_options(ignore_duplicate_bindings: bool) -> Self {
        Self {
            ignore_duplicate_bindings,
            ..Self::default()
        }
    }

    /// Record a handler binding
    ///
    /// Returns the name of a previously registered handler bound to the
    /// same (model, anonymity) pair, if any. The new entry is recorded
    /// regardless; duplicate detection only warns.
    pub fn register(&mut self, binding: &HandlerBinding) -> Option<String> {
        let duplicate_of = binding.model.as_deref().and_then(|model| {
            self.entries
                .iter()
                .find(|(_, entry)| {
                    entry.model.as_deref() == Some(model)
                        && entry.is_anonymous == binding.is_anonymous
                })
                .map(|(name, _)| name.clone())
        });

        if let Some(ref prior) = duplicate_of {
            if !self.ignore_duplicate_bindings {
                tracing::warn!(
                    handler = %binding.name,
                    prior = %prior,
                    model = ?binding.model,
                    "handler already registered for this model, \
                     you may experience inconsistent results"
                );
            }
        }

        self.entries.insert(
            binding.name.clone(),
            RegistryEntry {
                model: binding.model.clone(),
                is_anonymous: binding.is_anonymous,
            },
        );
        if binding.name != BASE_HANDLER && binding.name != ANONYMOUS_BASE_HANDLER {
            self.tracker.push(binding.name.clone());
        }

        duplicate_of
    }

    /// Look up the entry recorded under a handler name
    pub fn lookup(&self, handler: &str) -> Option<&RegistryEntry> {
        self.entries.get(handler)
    }

    /// Application handler names in registration order, base bindings excluded
    pub fn tracked(&self) -> &[String] {
        &self.tracker
    }

    /// Number of distinct handler names recorded
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = HandlerRegistry::new();
        assert!(registry.is_empty());

        registry.register(&HandlerBinding::new("notes", "Note"));
        let entry = registry.lookup("notes").unwrap();
        assert_eq!(entry.model.as_deref(), Some("Note"));
        assert!(!entry.is_anonymous);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_pair_is_reported_and_both_remain() {
        let mut registry = HandlerRegistry::new();
        assert!(registry.register(&HandlerBinding::new("notes", "Note")).is_none());

        let prior = registry.register(&HandlerBinding::new("notes_admin", "Note"));
        assert_eq!(prior.as_deref(), Some("notes"));

        // both stay queryable under their own names
        assert!(registry.lookup("notes").is_some());
        assert!(registry.lookup("notes_admin").is_some());
        assert_eq!(registry.tracked(), ["notes", "notes_admin"]);
    }

    #[test]
    fn test_anonymity_distinguishes_pairs() {
        let mut registry = HandlerRegistry::new();
        registry.register(&HandlerBinding::new("notes", "Note"));
        let prior = registry.register(&HandlerBinding::anonymous("notes_anon", "Note"));
        assert!(prior.is_none());
    }

    #[test]
    fn test_unbound_handlers_never_collide() {
        let mut registry = HandlerRegistry::new();
        registry.register(&HandlerBinding::unbound("ping"));
        let prior = registry.register(&HandlerBinding::unbound("pong"));
        assert!(prior.is_none());
        assert!(registry.lookup("ping").unwrap().model.is_none());
    }

    #[test]
    fn test_suppressed_duplicate_still_detected() {
        let mut registry = HandlerRegistry::with_options(true);
        registry.register(&HandlerBinding::new("notes", "Note"));
        // detection result is unchanged; only the warning is suppressed
        let prior = registry.register(&HandlerBinding::new("notes_admin", "Note"));
        assert_eq!(prior.as_deref(), Some("notes"));
    }

    #[test]
    fn test_base_bindings_enter_map_but_not_tracker() {
        let mut registry = HandlerRegistry::new();
        registry.register(&HandlerBinding::base());
        registry.register(&HandlerBinding::anonymous_base());
        registry.register(&HandlerBinding::new("notes", "Note"));

        assert!(registry.lookup(BASE_HANDLER).is_some());
        assert!(registry.lookup(ANONYMOUS_BASE_HANDLER).is_some());
        assert_eq!(registry.tracked(), ["notes"]);
    }

    #[test]
    fn test_same_name_overwrites_lookup_entry() {
        let mut registry = HandlerRegistry::new();
        registry.register(&HandlerBinding::new("notes", "Note"));
        registry.register(&HandlerBinding::anonymous("notes", "Note"));

        assert!(registry.lookup("notes").unwrap().is_anonymous);
        // the tracker keeps every non-base registration
        assert_eq!(registry.tracked(), ["notes", "notes"]);
    }
}

//! Resource handler trait: CRUD for free
//!
//! [`ResourceHandler`] supplies the full read/create/update/delete set as
//! default trait methods. An implementation provides its [`HandlerBinding`]
//! and its store, and optionally overrides [`ResourceHandler::resolve_scope`]
//! to narrow record visibility (per-user filtering and the like); every
//! fetch goes through the scope, so overrides take effect everywhere.
//!
//! Create is the one operation that constructs against the raw bound
//! model rather than the scope: the record does not yet exist in any
//! scope to be found.
//!
//! # Example
//!
//! ```rust
//! use resource_core::handlers::{HandlerBinding, ModelHandler, Payload, Request, ResourceHandler};
//! use resource_core::store::{MemoryStore, ModelSchema};
//!
//! let store = MemoryStore::new(vec![ModelSchema::new("Note").with_field("body")]);
//! let handler = ModelHandler::new(store, HandlerBinding::new("notes", "Note"));
//!
//! let mut request = Request::new().with_data(Payload::new().with("body", "remember"));
//! let created = handler.create(&mut request);
//! assert!(created.record().is_some());
//! ```

use http::Method;

use crate::store::{FilterCondition, LookupErrorKind, QueryScope, Record, Store};

use super::error::HandlerFault;
use super::outcome::{Outcome, Status};
use super::payload::Payload;
use super::registry::{ANONYMOUS_BASE_HANDLER, BASE_HANDLER};
use super::request::Request;
use super::resolver::resolve_extras;

/// Policy data binding a handler to a model
///
/// `fields` and `exclude` are projection hints handed through to the
/// serialization layer; this core records but never interprets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerBinding {
    /// Registered handler name
    pub name: String,
    /// The bound model, if any
    pub model: Option<String>,
    /// Whether the handler serves anonymous access
    pub is_anonymous: bool,
    /// Verbs the routing layer should admit for this handler
    pub allowed_methods: Vec<Method>,
    /// Projection hint: fields to serialize (pass-through)
    pub fields: Vec<String>,
    /// Projection hint: fields to omit from serialization (pass-through)
    pub exclude: Vec<String>,
}

impl HandlerBinding {
    /// A handler bound to a model, admitting the full CRUD verb set
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: Some(model.into()),
            is_anonymous: false,
            allowed_methods: vec![Method::GET, Method::POST, Method::PUT, Method::DELETE],
            fields: Vec::new(),
            exclude: vec!["id".to_string()],
        }
    }

    /// A handler with no model binding
    pub fn unbound(name: impl Into<String>) -> Self {
        Self {
            model: None,
            ..Self::new(name, "")
        }
    }

    /// An anonymous, read-only handler bound to a model
    pub fn anonymous(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            is_anonymous: true,
            allowed_methods: vec![Method::GET],
            ..Self::new(name, model)
        }
    }

    /// The built-in base binding
    pub fn base() -> Self {
        Self::unbound(BASE_HANDLER)
    }

    /// The built-in anonymous base binding
    pub fn anonymous_base() -> Self {
        Self {
            is_anonymous: true,
            allowed_methods: vec![Method::GET],
            ..Self::unbound(ANONYMOUS_BASE_HANDLER)
        }
    }

    /// Replace the admitted verb set
    #[must_use]
    pub fn with_allowed_methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.allowed_methods = methods.into_iter().collect();
        self
    }

    /// Set the serialized-fields projection hint
    #[must_use]
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the excluded-fields projection hint
    #[must_use]
    pub fn with_exclude(mut self, exclude: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude = exclude.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the routing layer should admit this verb
    pub fn allows(&self, method: &Method) -> bool {
        self.allowed_methods.contains(method)
    }
}

/// CRUD operations for a bound model
///
/// All default method bodies are final semantics, not placeholders:
/// implementing `binding` and `store` is enough for a fully working
/// handler. Override `resolve_scope` to restrict visibility.
pub trait ResourceHandler: Send + Sync {
    /// The handler's policy binding
    fn binding(&self) -> &HandlerBinding;

    /// The persistence engine this handler talks to
    fn store(&self) -> &dyn Store;

    /// The query scope this request may see, or `None` if the handler
    /// has no capability to serve model operations
    ///
    /// The default scope is every record of the bound model. Overrides
    /// may inspect the request to narrow it.
    fn resolve_scope<'a>(&'a self, _request: &Request) -> Option<QueryScope<'a>> {
        let model = self.binding().model.as_deref()?;
        let schema = self.store().schema(model)?;
        Some(QueryScope::new(self.store(), schema))
    }

    /// Whether this handler can serve model operations for the request
    fn has_model(&self, request: &Request) -> bool {
        self.resolve_scope(request).is_some()
    }

    /// Whether a record matching all conditions exists in scope
    ///
    /// An unbound handler is a hard fault here, as for delete.
    fn exists(
        &self,
        request: &Request,
        conditions: &[FilterCondition],
    ) -> Result<bool, HandlerFault> {
        let Some(scope) = self.resolve_scope(request) else {
            return Err(self.unbound());
        };
        match scope.get(conditions) {
            Ok(_) => Ok(true),
            Err(error) if error.kind == LookupErrorKind::MultipleFound => Ok(true),
            Err(_) => Ok(false),
        }
    }

    /// Fetch one record by primary-key routing parameter, or a lazy
    /// filtered collection when no primary key is supplied
    fn read<'a>(&'a self, request: &Request, filters: &[FilterCondition]) -> Outcome<'a> {
        let Some(scope) = self.resolve_scope(request) else {
            return Outcome::Status(Status::NotImplemented);
        };
        let schema = scope.schema();
        if let Some(raw) = request.param(schema.primary_key()) {
            let Ok(pk) = raw.parse::<i64>() else {
                return Outcome::Status(Status::BadRequest);
            };
            return match scope.get_by_pk(pk) {
                Ok(record) => Outcome::Record(record),
                Err(error) if error.kind == LookupErrorKind::NotFound => {
                    Outcome::Status(Status::NotFound)
                }
                // should never happen for a true primary key
                Err(_) => Outcome::Status(Status::BadRequest),
            };
        }
        Outcome::Collection(scope.filter(filters))
    }

    /// Persist a new record from the request payload
    ///
    /// Creation is conditional on non-existence of a record with the
    /// identical attribute set: an idempotency guard, not an upsert.
    fn create<'a>(&'a self, request: &mut Request) -> Outcome<'a> {
        let schema = self
            .binding()
            .model
            .as_deref()
            .and_then(|model| self.store().schema(model));
        // resolution runs first; with no bound model there is nothing to resolve
        if let Some(schema) = schema {
            if let Err(error) = resolve_extras(self.store(), schema, request, None) {
                return Outcome::Invalid(error.to_string());
            }
        }
        let Some(scope) = self.resolve_scope(request) else {
            return Outcome::Status(Status::NotImplemented);
        };
        // construction needs the raw model, not just a scope
        let Some(schema) = schema else {
            return Outcome::Status(Status::NotImplemented);
        };

        let attrs = request.data.as_ref().map(Payload::flatten).unwrap_or_default();
        if let Some(unknown) = attrs.keys().find(|k| !schema.is_assignable(k.as_str())) {
            return Outcome::Invalid(format!(
                "unknown field `{unknown}` for model `{}`",
                schema.name()
            ));
        }

        let conditions: Vec<FilterCondition> = attrs
            .iter()
            .map(|(field, value)| FilterCondition::eq(field.clone(), value.clone()))
            .collect();
        match scope.get(&conditions) {
            Ok(_) => {
                tracing::debug!(model = schema.name(), "create matched an existing record");
                Outcome::Status(Status::DuplicateEntry)
            }
            Err(error) if error.kind == LookupErrorKind::MultipleFound => {
                Outcome::Status(Status::DuplicateEntry)
            }
            Err(_) => {
                let mut record = Record::new(schema.name());
                for (field, value) in attrs {
                    record.set(field, value);
                }
                Outcome::Record(self.store().save(record))
            }
        }
    }

    /// Apply the request payload to the record named by the primary-key
    /// routing parameter
    ///
    /// Many-to-many directives apply here, once the instance is bound.
    /// Attribute keys outside the declared field set are rejected before
    /// any assignment happens.
    fn update<'a>(&'a self, request: &mut Request) -> Outcome<'a> {
        let Some(scope) = self.resolve_scope(request) else {
            return Outcome::Status(Status::NotImplemented);
        };
        let schema = scope.schema();
        let Some(raw) = request.param(schema.primary_key()) else {
            return Outcome::Status(Status::BadRequest);
        };
        let Ok(pk) = raw.parse::<i64>() else {
            return Outcome::Status(Status::BadRequest);
        };
        let mut instance = match scope.get_by_pk(pk) {
            Ok(record) => record,
            Err(error) if error.kind == LookupErrorKind::NotFound => {
                return Outcome::Status(Status::NotFound);
            }
            // should never happen for a true primary key
            Err(_) => return Outcome::Status(Status::BadRequest),
        };

        if let Err(error) = resolve_extras(self.store(), schema, request, Some(&mut instance)) {
            return Outcome::Invalid(error.to_string());
        }

        let attrs = request.data.as_ref().map(Payload::flatten).unwrap_or_default();
        if let Some(unknown) = attrs.keys().find(|k| !schema.is_assignable(k.as_str())) {
            return Outcome::Invalid(format!(
                "unknown field `{unknown}` for model `{}`",
                schema.name()
            ));
        }
        for (field, value) in attrs {
            instance.set(field, value);
        }
        self.store().save(instance);
        Outcome::Status(Status::AllOk)
    }

    /// Delete the single record matching the filters
    ///
    /// An unbound handler is a hard fault, not a status signal: reaching
    /// delete without a model is a wiring bug. An ambiguous target
    /// deletes nothing and reports a duplicate-entry conflict.
    fn delete<'a>(
        &'a self,
        request: &Request,
        filters: &[FilterCondition],
    ) -> Result<Outcome<'a>, HandlerFault> {
        let Some(scope) = self.resolve_scope(request) else {
            return Err(self.unbound());
        };
        match scope.get(filters) {
            Ok(record) => {
                self.store().delete(&record);
                Ok(Outcome::Status(Status::Deleted))
            }
            Err(error) if error.kind == LookupErrorKind::NotFound => {
                Ok(Outcome::Status(Status::NotHere))
            }
            Err(_) => Ok(Outcome::Status(Status::DuplicateEntry)),
        }
    }

    #[doc(hidden)]
    fn unbound(&self) -> HandlerFault {
        HandlerFault::UnboundModel {
            handler: self.binding().name.clone(),
        }
    }
}

/// The stock handler: a binding plus a store, nothing else
///
/// Serves the full CRUD set over the binding's model with the default
/// (unrestricted) scope. For restricted visibility, implement
/// [`ResourceHandler`] on your own type and override `resolve_scope`.
pub struct ModelHandler<S> {
    store: S,
    binding: HandlerBinding,
}

impl<S: Store> ModelHandler<S> {
    /// Create a handler over the given store and binding
    pub fn new(store: S, binding: HandlerBinding) -> Self {
        Self { store, binding }
    }
}

impl<S: Store> ResourceHandler for ModelHandler<S> {
    fn binding(&self) -> &HandlerBinding {
        &self.binding
    }

    fn store(&self) -> &dyn Store {
        &self.store
    }
}

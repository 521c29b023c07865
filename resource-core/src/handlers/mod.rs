//! Resource handlers: the request-facing CRUD layer
//!
//! A handler binds a name to a model and serves the four CRUD operations
//! over it, every fetch flowing through a visibility scope the handler
//! resolves per request. Transport concerns (routing, parsing,
//! authentication, serialization) live outside this crate; a handler sees
//! a [`Request`] and answers with an [`Outcome`].
//!
//! # Example
//!
//! ```rust
//! use resource_core::handlers::{
//!     HandlerBinding, HandlerRegistry, ModelHandler, Payload, Request, ResourceHandler,
//! };
//! use resource_core::store::{MemoryStore, ModelSchema};
//!
//! let store = MemoryStore::new(vec![ModelSchema::new("Note").with_field("body")]);
//! let handler = ModelHandler::new(store, HandlerBinding::new("notes", "Note"));
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register(handler.binding());
//!
//! let outcome = handler.create(&mut Request::new().with_data(Payload::new().with("body", "hi")));
//! assert!(outcome.record().is_some());
//! ```

mod error;
mod outcome;
mod payload;
mod registry;
mod request;
mod resolver;
mod traits;

pub use error::{HandlerFault, ResolveError};
pub use outcome::{Outcome, Status};
pub use payload::{FieldValue, Payload, CSRF_TOKEN_FIELD};
pub use registry::{HandlerRegistry, RegistryEntry, ANONYMOUS_BASE_HANDLER, BASE_HANDLER};
pub use request::Request;
pub use resolver::resolve_extras;
pub use traits::{HandlerBinding, ModelHandler, ResourceHandler};

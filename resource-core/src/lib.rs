//! # resource-core
//!
//! A transport-agnostic CRUD resource layer: bind a handler to a model
//! and get read, create, update, and delete with consistent outcome
//! signalling, scope-restricted visibility, and flat-payload relational
//! resolution.
//!
//! The crate deliberately ends where transport begins. Routing, content
//! negotiation, authentication, and serialization are collaborator
//! concerns; a handler consumes a [`handlers::Request`] and produces a
//! [`handlers::Outcome`] for some outer layer to render.
//!
//! ## Quick start
//!
//! ```rust
//! use resource_core::handlers::{HandlerBinding, ModelHandler, Payload, Request, ResourceHandler};
//! use resource_core::store::{FilterCondition, MemoryStore, ModelSchema};
//!
//! let store = MemoryStore::new(vec![ModelSchema::new("Note")
//!     .with_field("body")
//!     .with_field("status")]);
//! let handler = ModelHandler::new(store, HandlerBinding::new("notes", "Note"));
//!
//! let mut request = Request::new()
//!     .with_data(Payload::new().with("body", "ship it").with("status", "open"));
//! let created = handler.create(&mut request);
//! let pk = created.record().and_then(|r| r.get("id")).and_then(|v| v.as_i64());
//! assert_eq!(pk, Some(1));
//!
//! let open = handler.read(&Request::new(), &[FilterCondition::eq("status", "open")]);
//! assert!(matches!(open, resource_core::handlers::Outcome::Collection(_)));
//! ```
//!
//! ## Layout
//!
//! - [`store`]: schemas, records, lookup, filtering, and the [`store::Store`]
//!   persistence trait with an in-memory engine
//! - [`handlers`]: bindings, the [`handlers::ResourceHandler`] CRUD trait,
//!   relational payload resolution, and the handler registry
//! - [`config`]: layered configuration via Figment
//! - [`observability`]: tracing subscriber setup

pub mod config;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};

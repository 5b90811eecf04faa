//! Schema.org JSON-LD for mapped content entities.
//!
//! Given an entity and its [`Mapping`](schemadot_model::Mapping), the
//! [`EntityMapper`] resolves each mapped field into Schema.org values,
//! recursing into referenced entities, and the [`JsonLdBuilder`] assembles
//! the page-level document:
//!
//! - [`resolver`] — one stored field value → one JSON-LD value
//! - [`coercion`] — bare values wrapped in their implicit Schema.org type
//! - [`mapper`] — entity → node, with cardinality, identifiers and extension points
//! - [`builder`] — route → flattened list of typed nodes
//!
//! Building never fails. Missing mappings, hidden fields and unresolvable
//! values are omitted from the output instead.

pub mod builder;
pub mod coercion;
mod config;
pub mod document;
mod error;
mod extension;
pub mod links;
pub mod mapper;
pub mod resolver;
mod text;

pub use builder::{ENTITY_DOCUMENT_KEY, JsonLdBuilder};
pub use coercion::DefaultTypeCoercion;
pub use config::{CardinalityPolicy, IdentifierConfig, JsonLdConfig, SharedConfig, TextFormatRule};
pub use document::{Document, flatten, sort_properties};
pub use error::JsonLdError;
pub use extension::{ExtensionRegistry, FieldContext, JsonLdExtension};
pub use links::{PublicFilesUrlGenerator, UrlGenerator, absolute_url};
pub use mapper::{BuildState, EntityMapper, MapOptions};
pub use resolver::ValueContext;
pub use text::sanitize;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, JsonLdError>;

//! Content model consumed by the Schema.org structured-data engine.
//!
//! Defines the types every other crate in the workspace depends on:
//! - [`EntityRecord`] — the narrow read-only view of a content entity
//! - [`FieldValue`] — a typed field value, one of a closed set of [`StorageKind`]s
//! - [`Mapping`] — an entity bundle's Schema.org type and field → property assignments
//! - [`MappingProvider`], [`EntityStore`], [`RouteEntityResolver`] — collaborator seams
//!
//! In-memory implementations ([`Entity`], [`MappingRegistry`],
//! [`MemoryEntityStore`]) back fixtures and callers without a storage layer.

mod entity;
mod field;
mod ids;
mod mapping;
mod store;

pub use entity::{Entity, EntityRecord, Field};
pub use field::{Cardinality, FieldDefinition, FieldValue, NumberFormat, StorageKind};
pub use ids::{EntityKey, EntityUuid};
pub use mapping::{Mapping, MappingProvider, MappingRegistry, PropertyMapping};
pub use store::{EntityStore, MemoryEntityStore, RouteEntityResolver, RouteMatch};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while assembling model data.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("field '{field_name}' is already mapped on {schema_type}")]
    DuplicateField {
        schema_type: String,
        field_name: String,
    },

    #[error("property '{property}' is already mapped on {schema_type}")]
    DuplicateProperty {
        schema_type: String,
        property: String,
    },

    #[error("invalid entity key: {0}")]
    InvalidEntityKey(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

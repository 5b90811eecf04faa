//! Schema.org vocabulary lookups.
//!
//! The structured-data engine only needs a handful of questions answered
//! about the vocabulary: a type's ancestor chain, a property's range, and
//! whether a type declares a property. [`SchemaTypeManager`] is that seam;
//! [`SchemaVocabulary`] is an in-memory implementation that ships with a
//! bootstrap set of common types and can be loaded from TOML.

mod bootstrap;
mod manager;
mod vocabulary;

pub use manager::{DATA_TYPES, SchemaTypeManager};
pub use vocabulary::{SchemaProperty, SchemaType, SchemaVocabulary};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, VocabError>;

#[derive(Debug, thiserror::Error)]
pub enum VocabError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("type '{child}' declares unknown parent '{parent}'")]
    UnknownParent { child: String, parent: String },
}

//! Error types for the JSON-LD crate.
//!
//! Building documents never fails; these errors come from loading
//! configuration and registering extensions.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonLdError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("extension already registered: {0}")]
    DuplicateExtension(String),
}

//! Error types for the ICD catalog crate.
//!
//! Data drift (dangling `icd_refs`, unknown version tags, malformed filter
//! expressions) is absorbed by the matcher and reconciler and never shows up
//! here. Only caller-contract violations and configuration/document loading
//! failures surface as [`CatalogError`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A mutation targeted a pattern id missing from the supplied collection.
    #[error("Unknown equipment pattern: {0}")]
    UnknownPattern(String),

    /// A default referent was requested for an artifact id that is not in the catalog.
    #[error("Unknown artifact: {0}")]
    UnknownArtifact(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for CatalogError {
    fn from(err: serde_yaml::Error) -> Self {
        CatalogError::Serialization(err.to_string())
    }
}

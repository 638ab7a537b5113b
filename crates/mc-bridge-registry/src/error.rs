//! Registry construction and data loading errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry {registry}: duplicate key {key}")]
    DuplicateKey { registry: &'static str, key: String },

    #[error("registry {registry}: index {index} registered out of order (next free index is {expected})")]
    NonDenseIndex {
        registry: &'static str,
        index: usize,
        expected: usize,
    },

    #[error("registry {registry} was already populated")]
    AlreadyPopulated { registry: &'static str },

    #[error("registry {registry} is sealed")]
    Sealed { registry: &'static str },

    #[error("versioned registry {registry} has no versions")]
    NoVersions { registry: &'static str },

    #[error("mapping data {name}: {source}")]
    Data {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("registries were already initialized")]
    AlreadyInitialized,
}

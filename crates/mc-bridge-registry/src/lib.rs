//! Registry framework and the mapping tables loaded into it.
//!
//! Every registry goes through two phases: a mutable builder filled while the
//! process boots (core data first, then extensions), and a frozen, read-only
//! value produced by `freeze()`. Frozen registries hold no interior mutability
//! (except the write-once [`DeferredRegistry`]) and are shared across sessions
//! behind an `Arc` without locking.

pub mod deferred;
pub mod error;
pub mod list;
pub mod loader;
pub mod mapped;
pub mod mappings;
pub mod registries;
pub mod simple;
pub mod versioned;

pub use deferred::DeferredRegistry;
pub use error::RegistryError;
pub use list::{ListRegistry, ListRegistryBuilder};
pub use mapped::{MappedRegistry, MappedRegistryBuilder};
pub use registries::Registries;
pub use simple::SimpleRegistry;
pub use versioned::{VersionFallback, VersionedRegistry, VersionedRegistryBuilder};

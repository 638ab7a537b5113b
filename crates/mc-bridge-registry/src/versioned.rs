//! Version-indexed registry.
//!
//! Values are keyed by Bedrock protocol version. A lookup for a version that
//! has no exact entry is resolved through the registry's [`VersionFallback`]
//! policy, and the same request always resolves to the same entry.

use serde::Deserialize;

use crate::error::RegistryError;
use crate::mapped::{MappedRegistry, MappedRegistryBuilder};

/// How a version-indexed lookup resolves a version with no exact entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionFallback {
    /// Only an exact entry matches.
    Exact,
    /// The greatest version not above the request; the lowest known version
    /// when the request predates all of them.
    #[default]
    FloorOrLowest,
    /// The closest version by distance. Ties go to the lower version.
    Nearest,
}

impl VersionFallback {
    /// Pick an entry from `versions`, which must be sorted ascending.
    pub fn resolve(self, versions: &[u32], requested: u32) -> Option<u32> {
        if versions.binary_search(&requested).is_ok() {
            return Some(requested);
        }
        match self {
            VersionFallback::Exact => None,
            VersionFallback::FloorOrLowest => versions
                .iter()
                .rev()
                .find(|&&v| v <= requested)
                .or_else(|| versions.first())
                .copied(),
            VersionFallback::Nearest => versions
                .iter()
                .copied()
                .min_by_key(|&v| (v.abs_diff(requested), v)),
        }
    }
}

/// Mutable phase of a [`VersionedRegistry`].
#[derive(Debug)]
pub struct VersionedRegistryBuilder<T> {
    name: &'static str,
    fallback: VersionFallback,
    entries: MappedRegistryBuilder<u32, T>,
}

impl<T> VersionedRegistryBuilder<T> {
    pub fn new(name: &'static str, fallback: VersionFallback) -> Self {
        Self {
            name,
            fallback,
            entries: MappedRegistryBuilder::new(name),
        }
    }

    pub fn register(&mut self, version: u32, value: T) -> Result<(), RegistryError> {
        self.entries.register(version, value)
    }

    /// Freeze the registry. At least one version must be present.
    pub fn freeze(self) -> Result<VersionedRegistry<T>, RegistryError> {
        if self.entries.is_empty() {
            return Err(RegistryError::NoVersions {
                registry: self.name,
            });
        }
        let entries = self.entries.freeze();
        let mut versions: Vec<u32> = entries.iter().map(|(v, _)| *v).collect();
        versions.sort_unstable();
        Ok(VersionedRegistry {
            fallback: self.fallback,
            versions,
            entries,
        })
    }
}

/// Read-only version-indexed registry.
#[derive(Debug, Clone)]
pub struct VersionedRegistry<T> {
    fallback: VersionFallback,
    versions: Vec<u32>,
    entries: MappedRegistry<u32, T>,
}

impl<T> VersionedRegistry<T> {
    pub fn name(&self) -> &'static str {
        self.entries.name()
    }

    pub fn fallback(&self) -> VersionFallback {
        self.fallback
    }

    /// Known versions, ascending.
    pub fn versions(&self) -> &[u32] {
        &self.versions
    }

    /// The version a lookup for `requested` resolves to.
    pub fn resolve_version(&self, requested: u32) -> Option<u32> {
        self.fallback.resolve(&self.versions, requested)
    }

    pub fn get(&self, requested: u32) -> Option<&T> {
        self.resolve_version(requested)
            .and_then(|v| self.entries.get(&v))
    }

    /// Lookup that only matches an exact version entry.
    pub fn get_exact(&self, version: u32) -> Option<&T> {
        self.entries.get(&version)
    }
}

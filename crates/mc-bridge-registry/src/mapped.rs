//! Key-mapped registry: the generic keyed container the other registries
//! wrap.

use std::borrow::Borrow;
use std::collections::hash_map::{self, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::RegistryError;

/// Mutable phase of a [`MappedRegistry`].
#[derive(Debug)]
pub struct MappedRegistryBuilder<K, V> {
    name: &'static str,
    entries: HashMap<K, V>,
}

impl<K, V> MappedRegistryBuilder<K, V>
where
    K: Eq + Hash + Debug,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: HashMap::new(),
        }
    }

    /// Add an entry. A key may only be registered once.
    pub fn register(&mut self, key: K, value: V) -> Result<(), RegistryError> {
        match self.entries.entry(key) {
            hash_map::Entry::Occupied(e) => Err(RegistryError::DuplicateKey {
                registry: self.name,
                key: format!("{:?}", e.key()),
            }),
            hash_map::Entry::Vacant(e) => {
                e.insert(value);
                Ok(())
            }
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn freeze(self) -> MappedRegistry<K, V> {
        MappedRegistry {
            name: self.name,
            entries: self.entries,
        }
    }
}

/// Read-only key to value lookup.
#[derive(Debug, Clone)]
pub struct MappedRegistry<K, V> {
    name: &'static str,
    entries: HashMap<K, V>,
}

impl<K, V> MappedRegistry<K, V>
where
    K: Eq + Hash,
{
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

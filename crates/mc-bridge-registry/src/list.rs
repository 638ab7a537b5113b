//! Ordered-list registry indexed by dense numeric identity.

use crate::error::RegistryError;

/// Mutable phase of a [`ListRegistry`]. Entries must be registered at
/// consecutive indices starting from zero.
#[derive(Debug)]
pub struct ListRegistryBuilder<T> {
    name: &'static str,
    entries: Vec<T>,
}

impl<T> ListRegistryBuilder<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    /// Register `value` at `index`, which must be the next free index.
    pub fn register(&mut self, index: usize, value: T) -> Result<(), RegistryError> {
        let expected = self.entries.len();
        if index != expected {
            return Err(RegistryError::NonDenseIndex {
                registry: self.name,
                index,
                expected,
            });
        }
        self.entries.push(value);
        Ok(())
    }

    /// Append at the next free index and return it.
    pub fn push(&mut self, value: T) -> usize {
        self.entries.push(value);
        self.entries.len() - 1
    }

    pub fn freeze(self) -> ListRegistry<T> {
        ListRegistry {
            name: self.name,
            entries: self.entries,
        }
    }
}

/// Read-only dense list.
#[derive(Debug, Clone)]
pub struct ListRegistry<T> {
    name: &'static str,
    entries: Vec<T>,
}

impl<T> ListRegistry<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Lookup by numeric identity. Negative or out-of-range ids return `None`.
    pub fn get(&self, id: i32) -> Option<&T> {
        usize::try_from(id).ok().and_then(|i| self.entries.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.entries.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Registry populated once after core data loads, typically by extensions.

use std::sync::OnceLock;

use crate::error::RegistryError;

/// Write-once registry. Lookups before population see nothing; after
/// population the value never changes. [`seal`](Self::seal) closes the
/// population window for good, leaving the registry empty if nobody filled it.
#[derive(Debug)]
pub struct DeferredRegistry<T> {
    name: &'static str,
    /// `Some(None)` once sealed without a value.
    value: OnceLock<Option<T>>,
}

impl<T> DeferredRegistry<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            value: OnceLock::new(),
        }
    }

    pub fn populate(&self, value: T) -> Result<(), RegistryError> {
        self.value.set(Some(value)).map_err(|_| match self.value.get() {
            Some(None) => RegistryError::Sealed {
                registry: self.name,
            },
            _ => RegistryError::AlreadyPopulated {
                registry: self.name,
            },
        })
    }

    /// End the population phase. Later [`populate`](Self::populate) calls fail.
    pub fn seal(&self) {
        let _ = self.value.get_or_init(|| None);
    }

    pub fn get(&self) -> Option<&T> {
        self.value.get().and_then(Option::as_ref)
    }

    pub fn is_populated(&self) -> bool {
        self.get().is_some()
    }

    pub fn is_sealed(&self) -> bool {
        self.value.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populate_once() {
        let registry = DeferredRegistry::new("custom");
        assert!(registry.get().is_none());
        registry.populate(vec![1, 2]).unwrap();
        assert_eq!(registry.get(), Some(&vec![1, 2]));

        let err = registry.populate(vec![3]).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyPopulated { .. }));
        assert_eq!(registry.get(), Some(&vec![1, 2]));

        registry.seal();
        assert_eq!(registry.get(), Some(&vec![1, 2]));
    }

    #[test]
    fn sealed_registry_stays_empty() {
        let registry: DeferredRegistry<Vec<i32>> = DeferredRegistry::new("custom");
        registry.seal();
        assert!(registry.is_sealed());

        let err = registry.populate(vec![1]).unwrap_err();
        assert!(matches!(err, RegistryError::Sealed { .. }));
        assert!(registry.get().is_none());
        assert!(!registry.is_populated());
    }
}

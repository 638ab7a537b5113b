//! Registry holding exactly one value.

/// A single value set once at construction.
#[derive(Debug, Clone)]
pub struct SimpleRegistry<T> {
    value: T,
}

impl<T> SimpleRegistry<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }
}

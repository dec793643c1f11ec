use std::collections::BTreeMap;

use crate::Values;

/// A sink for named result slots.
///
/// Drivers declare one slot per model (and any aggregate slots such as
/// `rmse`) after a pass completes. Declaring a name that already exists
/// replaces its contents, so a reporter always holds the latest pass.
pub trait Reporter {
    /// Declares (or overwrites) the slot `name`.
    fn declare(&mut self, name: &str, values: Values);
}

/// An in-memory [`Reporter`] keyed by slot name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReporterStore {
    slots: BTreeMap<String, Values>,
}

impl ReporterStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slot `name`, if declared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Values> {
        self.slots.get(name)
    }

    /// Returns the slot `name` if it holds one value per row.
    #[must_use]
    pub fn get_real(&self, name: &str) -> Option<&[f64]> {
        self.get(name).and_then(Values::as_real)
    }

    /// Returns the slot `name` if it holds a vector per row.
    #[must_use]
    pub fn get_vector_real(&self, name: &str) -> Option<&[Vec<f64>]> {
        self.get(name).and_then(Values::as_vector_real)
    }

    /// Returns the declared slot names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Returns `true` if no slots are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Reporter for ReporterStore {
    fn declare(&mut self, name: &str, values: Values) {
        self.slots.insert(name.to_string(), values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters_respect_shape() {
        let mut store = ReporterStore::new();
        store.declare("a", Values::Real(vec![1.0, 2.0]));
        store.declare("b", Values::VectorReal(vec![vec![1.0], vec![2.0, 3.0]]));

        assert_eq!(store.get_real("a"), Some(&[1.0, 2.0][..]));
        assert!(store.get_vector_real("a").is_none());
        assert_eq!(store.get_vector_real("b").map(<[_]>::len), Some(2));
        assert!(store.get_real("b").is_none());
        assert!(store.get("c").is_none());
    }

    #[test]
    fn redeclaring_replaces_slot() {
        let mut store = ReporterStore::new();
        store.declare("a", Values::Real(vec![1.0]));
        store.declare("a", Values::Real(vec![5.0, 6.0]));

        assert_eq!(store.get_real("a"), Some(&[5.0, 6.0][..]));
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["a"]);
    }
}

use std::{fmt, sync::Arc};

use umbra_core::{OutputKind, Surrogate};

use crate::Error;

/// A named surrogate model with its declared output kind.
#[derive(Clone)]
pub struct RosterEntry {
    name: String,
    kind: OutputKind,
    model: Arc<dyn Surrogate>,
}

impl RosterEntry {
    /// Returns the name results are published under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> OutputKind {
        self.kind
    }

    #[must_use]
    pub fn model(&self) -> &dyn Surrogate {
        self.model.as_ref()
    }
}

impl fmt::Debug for RosterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RosterEntry")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// The ordered set of models a driver evaluates.
///
/// Entry order fixes the model index used by every per-model result,
/// including the `rmse` slot. Every rank must build the same roster.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a model.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateModel`] if `name` is already in the roster.
    pub fn push(
        &mut self,
        name: impl Into<String>,
        kind: OutputKind,
        model: Arc<dyn Surrogate>,
    ) -> Result<(), Error> {
        let name = name.into();
        if self.entries.iter().any(|entry| entry.name == name) {
            return Err(Error::DuplicateModel(name));
        }
        self.entries.push(RosterEntry { name, kind, model });
        Ok(())
    }

    /// Appends a model, returning the roster for chaining.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateModel`] if `name` is already in the roster.
    pub fn with_model(
        mut self,
        name: impl Into<String>,
        kind: OutputKind,
        model: Arc<dyn Surrogate>,
    ) -> Result<Self, Error> {
        self.push(name, kind, model)?;
        Ok(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RosterEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter()
    }
}

use std::collections::HashMap;

use faultline_core::ErrorKind;
use faultline_core::kind::BUILTIN;

use crate::error::ConfigurationError;

/// Every error kind the process can raise, looked up by name
///
/// Configuration refers to kinds by name; the catalog turns those names back
/// into kinds. Registering a kind also registers its ancestors.
#[derive(Debug, Clone, Default)]
pub struct KindCatalog {
    kinds: HashMap<&'static str, &'static ErrorKind>,
}

impl KindCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the kinds defined by `faultline-core`
    pub fn builtin() -> Self {
        let mut kinds = HashMap::new();
        for kind in BUILTIN {
            kinds.insert(kind.name(), kind);
        }
        Self { kinds }
    }

    /// Register `kind` and its ancestors
    ///
    /// Registering the same kind twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateKind`] if a different kind with
    /// the same name is already registered
    pub fn register(&mut self, kind: &'static ErrorKind) -> Result<(), ConfigurationError> {
        for kind in kind.lineage() {
            match self.kinds.get(kind.name()) {
                Some(existing) if std::ptr::eq(*existing, kind) => {}
                Some(_) => return Err(ConfigurationError::DuplicateKind { name: kind.name() }),
                None => {
                    self.kinds.insert(kind.name(), kind);
                }
            }
        }
        Ok(())
    }

    /// Register several kinds
    ///
    /// # Errors
    ///
    /// Stops at the first name clash
    pub fn register_all(
        &mut self,
        kinds: impl IntoIterator<Item = &'static ErrorKind>,
    ) -> Result<(), ConfigurationError> {
        kinds.into_iter().try_for_each(|kind| self.register(kind))
    }

    pub fn get(&self, name: &str) -> Option<&'static ErrorKind> {
        self.kinds.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

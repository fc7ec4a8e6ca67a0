//! Resolved collaborators handed to factories

use std::collections::HashMap;
use std::sync::Arc;

use charisma_domain::error::{Error, Result};

use super::Instance;

/// The declared dependencies of a module, resolved and bound by key
#[derive(Debug, Clone, Default)]
pub struct Collaborators {
    instances: HashMap<String, Instance>,
}

impl Collaborators {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an instance to a key
    pub fn insert<K: Into<String>>(&mut self, key: K, instance: Instance) {
        self.instances.insert(key.into(), instance);
    }

    /// Get the collaborator bound to `key` as `Arc<T>`
    ///
    /// Fails with `UnknownKey` if the key was not declared and with
    /// `TypeMismatch` if the collaborator does not expose `T`.
    pub fn get<T>(&self, key: &str) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let instance = self.instances.get(key).ok_or_else(|| Error::unknown_key(key))?;
        instance.get::<T>().ok_or_else(|| Error::TypeMismatch {
            key: key.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }

    /// Get the raw instance bound to `key`
    pub fn instance(&self, key: &str) -> Option<&Instance> {
        self.instances.get(key)
    }

    /// Bound keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    /// Number of bound collaborators
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether nothing is bound
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl FromIterator<(String, Instance)> for Collaborators {
    fn from_iter<I: IntoIterator<Item = (String, Instance)>>(iter: I) -> Self {
        Self {
            instances: iter.into_iter().collect(),
        }
    }
}

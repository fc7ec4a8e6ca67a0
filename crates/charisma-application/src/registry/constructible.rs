//! Module constructibles

use std::fmt;
use std::sync::Arc;

use charisma_domain::error::Result;

use super::{Collaborators, Instance};

/// Factory building an instance from its resolved collaborators
pub type FactoryFn = dyn Fn(&Collaborators) -> Result<Instance> + Send + Sync;

/// Recipe for building a module's singleton
///
/// Declares the registration keys the module needs and, for controllers,
/// the method names it dispatches. The container resolves every declared
/// dependency before calling the factory.
#[derive(Clone)]
pub struct Constructible {
    dependencies: Vec<String>,
    methods: Vec<&'static str>,
    factory: Arc<FactoryFn>,
}

impl Constructible {
    /// Create a constructible from a factory function
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&Collaborators) -> Result<Instance> + Send + Sync + 'static,
    {
        Self {
            dependencies: Vec::new(),
            methods: Vec::new(),
            factory: Arc::new(factory),
        }
    }

    /// Constructible that always yields the given pre-built instance
    pub fn value(instance: Instance) -> Self {
        Self::new(move |_| Ok(instance.clone()))
    }

    /// Declare the registration keys this module depends on
    pub fn depends_on(mut self, keys: &[&str]) -> Self {
        self.dependencies
            .extend(keys.iter().map(|k| (*k).to_string()));
        self
    }

    /// Declare the methods a controller dispatches
    pub fn with_methods(mut self, methods: &[&'static str]) -> Self {
        self.methods.extend_from_slice(methods);
        self
    }

    /// Declared dependency keys
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Declared controller methods
    pub fn methods(&self) -> &[&'static str] {
        &self.methods
    }

    /// Whether the module declares the given method
    pub fn declares_method(&self, method: &str) -> bool {
        self.methods.contains(&method)
    }

    /// Build the instance
    pub fn construct(&self, collaborators: &Collaborators) -> Result<Instance> {
        (self.factory)(collaborators)
    }
}

impl fmt::Debug for Constructible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructible")
            .field("dependencies", &self.dependencies)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

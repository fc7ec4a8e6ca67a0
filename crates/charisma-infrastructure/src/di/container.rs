//! Service container
//!
//! Holds the registry produced by the scanner and resolves registration
//! keys to singleton [`Instance`]s.
//!
//! ## Lifecycle
//!
//! ```text
//! new() → register(batch) → validate() → resolve(key)* → teardown()
//! ```
//!
//! - `register` runs once; the registry is immutable afterwards.
//! - `resolve` builds an instance on first access, after its declared
//!   dependencies, and returns the cached instance afterwards.
//! - `teardown` runs release hooks in reverse construction order; later
//!   resolves fail with `ContainerClosed`.
//!
//! Each key has its own construction lock, so concurrent first resolutions
//! of the same key construct it once while unrelated keys build in
//! parallel. Constructed instances are read through an `ArcSwapOption`
//! without locking. The declared graph below a key is checked for cycles before any
//! construction lock is taken, which keeps lock acquisition acyclic.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwapOption;
use charisma_application::registry::{Collaborators, Constructible, Instance};
use charisma_domain::error::{Error, Result};
use once_cell::sync::OnceCell;
use tracing::{debug, info, warn};

/// A registration key bound to its constructible
#[derive(Debug, Clone)]
pub struct Registration {
    key: String,
    origin: String,
    constructible: Constructible,
}

impl Registration {
    /// Bind a constructible to a key; `origin` names where it came from
    pub fn new<K: Into<String>, O: Into<String>>(
        key: K,
        origin: O,
        constructible: Constructible,
    ) -> Self {
        Self {
            key: key.into(),
            origin: origin.into(),
            constructible,
        }
    }

    /// Bind a pre-built value to a key
    pub fn value<K: Into<String>>(key: K, instance: Instance) -> Self {
        Self::new(key, "<value>", Constructible::value(instance))
    }

    /// Registration key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Where the registration came from
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The constructible
    pub fn constructible(&self) -> &Constructible {
        &self.constructible
    }
}

struct Entry {
    registration: Registration,
    instance: ArcSwapOption<Instance>,
    building: Mutex<()>,
}

impl Entry {
    fn cached(&self) -> Option<Instance> {
        self.instance.load().as_deref().cloned()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-wide service container
#[derive(Default)]
pub struct Container {
    entries: OnceCell<HashMap<String, Entry>>,
    constructed: Mutex<Vec<(String, Instance)>>,
    closed: AtomicBool,
}

impl Container {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the registry
    ///
    /// May be called once. Fails with `DuplicateKey` if two registrations
    /// share a key, leaving the container unregistered.
    pub fn register(&self, batch: Vec<Registration>) -> Result<()> {
        if self.entries.get().is_some() {
            return Err(Error::AlreadyRegistered);
        }
        let mut entries: HashMap<String, Entry> = HashMap::with_capacity(batch.len());
        for registration in batch {
            if let Some(existing) = entries.get(&registration.key) {
                return Err(Error::DuplicateKey {
                    key: registration.key.clone(),
                    first: existing.registration.origin.clone(),
                    second: registration.origin,
                });
            }
            entries.insert(
                registration.key.clone(),
                Entry {
                    registration,
                    instance: ArcSwapOption::empty(),
                    building: Mutex::new(()),
                },
            );
        }
        let count = entries.len();
        self.entries
            .set(entries)
            .map_err(|_| Error::AlreadyRegistered)?;
        debug!(count, "Container registry populated");
        Ok(())
    }

    fn entry(&self, key: &str) -> Result<&Entry> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::ContainerClosed);
        }
        self.entries
            .get()
            .and_then(|entries| entries.get(key))
            .ok_or_else(|| Error::unknown_key(key))
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .get()
            .map(|e| e.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    /// Whether a key is registered
    pub fn contains(&self, key: &str) -> bool {
        self.entries.get().is_some_and(|e| e.contains_key(key))
    }

    /// The constructible registered under `key`
    pub fn constructible(&self, key: &str) -> Result<&Constructible> {
        Ok(&self.entry(key)?.registration.constructible)
    }

    /// Whether `key` has been constructed and not torn down
    pub fn is_resolved(&self, key: &str) -> bool {
        !self.is_closed()
            && self
                .entries
                .get()
                .and_then(|e| e.get(key))
                .is_some_and(|entry| entry.instance.load().is_some())
    }

    /// Number of constructed instances
    pub fn resolved_count(&self) -> usize {
        lock(&self.constructed).len()
    }

    /// Whether teardown has run
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Resolve a key to its singleton instance
    pub fn resolve(&self, key: &str) -> Result<Instance> {
        let entry = self.entry(key)?;
        if let Some(instance) = entry.cached() {
            return Ok(instance);
        }
        self.check_graph(key, &mut Vec::new(), &mut HashSet::new())?;
        self.construct(key)
    }

    /// Resolve a key and take its `Arc<T>` view
    pub fn resolve_as<T>(&self, key: &str) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve(key)?.get::<T>().ok_or_else(|| Error::TypeMismatch {
            key: key.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }

    fn construct(&self, key: &str) -> Result<Instance> {
        let entry = self.entry(key)?;
        if let Some(instance) = entry.cached() {
            return Ok(instance);
        }
        let _building = lock(&entry.building);
        if let Some(instance) = entry.cached() {
            return Ok(instance);
        }

        let constructible = &entry.registration.constructible;
        let mut collaborators = Collaborators::new();
        for dependency in constructible.dependencies() {
            collaborators.insert(dependency.clone(), self.construct(dependency)?);
        }
        let instance = constructible.construct(&collaborators)?;

        if self.closed.load(Ordering::Acquire) {
            return Err(Error::ContainerClosed);
        }
        entry.instance.store(Some(Arc::new(instance.clone())));
        lock(&self.constructed).push((key.to_string(), instance.clone()));
        debug!(key, views = ?instance.type_names(), "Constructed instance");
        Ok(instance)
    }

    /// Depth-first walk of the declared graph below `key`
    ///
    /// `path` holds the keys on the current walk; re-entering one of them
    /// is a cycle.
    fn check_graph(
        &self,
        key: &str,
        path: &mut Vec<String>,
        done: &mut HashSet<String>,
    ) -> Result<()> {
        if done.contains(key) {
            return Ok(());
        }
        if let Some(start) = path.iter().position(|k| k == key) {
            let mut cycle = path[start..].to_vec();
            cycle.push(key.to_string());
            return Err(Error::CircularDependency { cycle });
        }
        let entry = self.entry(key)?;
        path.push(key.to_string());
        for dependency in entry.registration.constructible.dependencies() {
            self.check_graph(dependency, path, done)?;
        }
        path.pop();
        done.insert(key.to_string());
        Ok(())
    }

    /// Check the whole declared graph without constructing anything
    ///
    /// Reports the first unknown dependency or cycle, in key order.
    pub fn validate(&self) -> Result<()> {
        let mut done = HashSet::new();
        for key in self.keys() {
            self.check_graph(&key, &mut Vec::new(), &mut done)?;
        }
        Ok(())
    }

    /// Release every constructed instance, newest first
    ///
    /// Release failures are logged. Runs once; later calls are no-ops.
    pub async fn teardown(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let constructed = std::mem::take(&mut *lock(&self.constructed));
        let count = constructed.len();
        for (key, instance) in constructed.into_iter().rev() {
            if let Some(release) = instance.release_hook() {
                match release().await {
                    Ok(()) => debug!(key = %key, "Released instance"),
                    Err(e) => warn!(key = %key, error = %e, "Release hook failed"),
                }
            }
        }
        if let Some(entries) = self.entries.get() {
            for entry in entries.values() {
                entry.instance.store(None);
            }
        }
        info!(released = count, "Container torn down");
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("keys", &self.keys())
            .field("resolved", &self.resolved_count())
            .field("closed", &self.is_closed())
            .finish()
    }
}

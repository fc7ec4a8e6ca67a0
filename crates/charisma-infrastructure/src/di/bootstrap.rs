//! Composition root
//!
//! Builds the container the server runs on: scan the linked modules,
//! add the settings values, register everything in one batch and check
//! the dependency graph.

use std::sync::Arc;

use charisma_application::registry::Instance;
use charisma_domain::constants::{CACHE_SETTINGS_KEY, TASK_SETTINGS_KEY, TOKEN_SETTINGS_KEY};
use charisma_domain::error::Result;
use tracing::info;

use super::container::{Container, Registration};
use super::scanner::{ModuleScanner, ScanReport};
use crate::config::AppConfig;

/// Settings registered as pre-built values
pub fn settings_registrations(config: &AppConfig) -> Result<Vec<Registration>> {
    Ok(vec![
        Registration::value(
            CACHE_SETTINGS_KEY,
            Instance::of(Arc::new(config.cache.to_settings())),
        ),
        Registration::value(
            TOKEN_SETTINGS_KEY,
            Instance::of(Arc::new(config.auth.jwt.to_settings()?)),
        ),
        Registration::value(
            TASK_SETTINGS_KEY,
            Instance::of(Arc::new(config.tasks.to_settings()?)),
        ),
    ])
}

/// Register a scan report plus the settings values into a new container
pub fn build_container_from(report: ScanReport, config: &AppConfig) -> Result<Arc<Container>> {
    let mut batch = report.registrations;
    batch.extend(settings_registrations(config)?);

    let container = Container::new();
    container.register(batch)?;
    container.validate()?;
    info!(keys = container.keys().len(), "Container ready");
    Ok(Arc::new(container))
}

/// Build the container from every module linked into the binary
pub fn build_container(config: &AppConfig) -> Result<Arc<Container>> {
    let scanner = ModuleScanner::new(config.modules.roots.iter().cloned());
    build_container_from(scanner.scan_linked(), config)
}

//! `cacheService` module
//!
//! In-memory Moka cache sized from `cacheSettings`. Entries are dropped when
//! the container is torn down.

use std::sync::Arc;

use charisma_application::registry::{Constructible, Instance};
use charisma_domain::constants::CACHE_SETTINGS_KEY;
use charisma_domain::error::Result;
use charisma_domain::ports::CacheProvider;
use charisma_domain::value_objects::CacheSettings;

use crate::cache::MokaCacheProvider;

fn load() -> Result<Constructible> {
    Ok(Constructible::new(|deps| {
        let settings = deps.get::<CacheSettings>(CACHE_SETTINGS_KEY)?;
        let provider = Arc::new(MokaCacheProvider::with_config(
            settings.max_capacity,
            settings.default_ttl,
        ));
        let released = Arc::clone(&provider);
        Ok(Instance::of::<dyn CacheProvider>(provider).with_release(move || {
            let provider = Arc::clone(&released);
            async move { provider.clear().await }
        }))
    })
    .depends_on(&[CACHE_SETTINGS_KEY]))
}

charisma_application::register_module!(load);

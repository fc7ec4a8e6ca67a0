//! Provider modules
//!
//! One source file per registered module. The file stem decides the
//! registration key, so `domains/cache/cache_service.rs` registers as
//! `cacheService`.

pub mod application;
pub mod domains;

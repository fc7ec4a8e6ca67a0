//! Infrastructure-facing provider modules

pub mod cache;
pub mod emails;
pub mod notifications;
pub mod passwords;
pub mod storage;

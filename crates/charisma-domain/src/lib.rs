//! # Charisma Domain
//!
//! Core entities, value objects and port traits shared by every layer.
//! This crate has no knowledge of HTTP, configuration files or concrete
//! storage engines.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`entities`] | `Role` and `User` documents |
//! | [`value_objects`] | Identity, settings, pagination and query types |
//! | [`ports`] | Traits implemented by providers (cache, storage, tokens, ...) |
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`constants`] | Domain constants (cache TTLs, key prefixes, defaults) |

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use entities::{Role, RoleStatus, User, UserStatus};
pub use error::{Error, Result};
pub use value_objects::{Claims, Page, Pagination, RequestIdentity};

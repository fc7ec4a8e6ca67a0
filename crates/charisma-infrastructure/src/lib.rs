//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns for the Charisma API.
//!
//! ## Module Categories
//!
//! ### Configuration & DI
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-layered TOML and environment configuration |
//! | [`di`] | Module scanner, service container and bootstrap |
//! | [`constants`] | Infrastructure defaults |
//!
//! ### Runtime
//! | Module | Description |
//! |--------|-------------|
//! | [`tasks`] | Bounded background task queue |
//! | [`modules`] | Infrastructure modules registered with the container (`tasksService`) |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

// Provider modules register at link time; keep the crate linked
extern crate charisma_providers;

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod modules;
pub mod tasks;

pub use di::{Container, build_container};
pub use error_ext::ErrorContext;

//! Application Layer - Charisma API
//!
//! Module registry, dispatch contract and the resource modules built on
//! the domain ports.
//!
//! ## Architecture
//!
//! The application layer:
//! - Declares the [`registry::MODULES`] slice every module registers into
//! - Defines the [`dispatch::Controller`] contract the HTTP layer calls
//! - Implements the roles and users services and controllers
//! - Has no dependencies on infrastructure or HTTP frameworks
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `charisma-domain`: entities, value objects, ports and errors
//! - Pure Rust libraries for async, serialization and validation

pub mod cache;
pub mod dispatch;
pub mod modules;
pub mod registry;
pub mod validation;

pub use dispatch::{Controller, Reply, RequestContext};
pub use registry::{Collaborators, Constructible, Instance, MODULES, ModuleEntry};

//! Domain Port Interfaces
//!
//! Boundary contracts implemented by provider and infrastructure modules.
//! Modules depend on these traits, never on each other's concrete types;
//! the service container hands out `Arc<dyn Port>` views by registration key.
//!
//! ## Organization
//!
//! - **cache** - JSON cache with per-entry TTL and pattern deletion
//! - **storage** - Role and user repositories
//! - **tokens** - Credential issuing and verification
//! - **notifications** - Outbound email and notification side effects
//! - **passwords** - One-way password hashing
//! - **tasks** - Background task queue

/// Cache provider port
pub mod cache;
/// Outbound email and notification ports
pub mod notifications;
/// Password hashing port
pub mod passwords;
/// Document storage ports
pub mod storage;
/// Background task queue port
pub mod tasks;
/// Credential ports
pub mod tokens;

pub use cache::{CacheEntryConfig, CacheProvider, CacheStats};
pub use notifications::{EmailSender, NotificationSender};
pub use passwords::PasswordHasher;
pub use storage::{RoleRepository, StorageProvider, UserRepository};
pub use tasks::{BackgroundTask, TaskQueue};
pub use tokens::{TokenKind, TokenService, TokenVerifier};

//! # Charisma API - Provider Implementations
//!
//! Concrete implementations of the ports defined in `charisma-domain`, and
//! the modules that register them with the service container.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementation | Module key |
//! |----------|------|----------------|------------|
//! | Cache | `CacheProvider` | Moka | `cacheService` |
//! | Storage | `StorageProvider` | In-memory | `storageService` |
//! | Tokens | `TokenService`, `TokenVerifier` | JWT (HMAC) | `tokensService` |
//! | Passwords | `PasswordHasher` | Argon2 | `passwordsService` |
//! | Emails | `EmailSender` | Log | `emailsService` |
//! | Notifications | `NotificationSender` | Log | `notificationsService` |
//!
//! ## Linking
//!
//! Modules register at link time. A binary that builds the container must
//! reference this crate so the linker keeps its registrations:
//!
//! ```ignore
//! extern crate charisma_providers;
//! ```

pub use charisma_domain::error::{Error, Result};
pub use charisma_domain::ports::{
    CacheProvider, EmailSender, NotificationSender, PasswordHasher, StorageProvider, TokenService,
    TokenVerifier,
};

/// Provider-specific constants
pub mod constants;

/// Cache provider implementations
pub mod cache;

/// Storage provider implementations
pub mod storage;

/// Credential implementations
pub mod tokens;

/// Password hashing implementations
pub mod passwords;

/// Outbound email and notification senders
pub mod notifications;

/// Registered provider modules
pub mod modules;

pub use cache::MokaCacheProvider;
pub use notifications::{LogEmailSender, LogNotificationSender};
pub use passwords::Argon2PasswordHasher;
pub use storage::MemoryStorageProvider;
pub use tokens::JwtTokenService;

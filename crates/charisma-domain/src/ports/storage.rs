//! Storage Ports
//!
//! Repository contracts for the role and user documents.

use std::sync::Arc;

use async_trait::async_trait;

use crate::entities::{Role, User};
use crate::error::Result;
use crate::value_objects::{Page, Pagination, RoleFilter, UserFilter};

/// Role document repository
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Insert a new role
    ///
    /// Fails with `Conflict` if the name is already taken.
    async fn insert(&self, role: Role) -> Result<Role>;

    /// Find a role by id
    async fn find_by_id(&self, id: &str) -> Result<Option<Role>>;

    /// Find a role by exact name
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>>;

    /// List roles matching a filter, sorted and paginated
    async fn list(&self, filter: &RoleFilter, page: Pagination) -> Result<Page<Role>>;

    /// Replace a stored role
    ///
    /// Returns `None` if no role has the given id. Fails with `Conflict` if
    /// the new name is used by another role.
    async fn update(&self, role: Role) -> Result<Option<Role>>;

    /// Delete a role, returning it if it existed
    async fn delete(&self, id: &str) -> Result<Option<Role>>;
}

/// User document repository
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user
    ///
    /// Fails with `Conflict` if the email or phone is already taken.
    async fn insert(&self, user: User) -> Result<User>;

    /// Find a user by id
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// List users matching a filter, sorted and paginated
    async fn list(&self, filter: &UserFilter, page: Pagination) -> Result<Page<User>>;

    /// Replace a stored user
    ///
    /// Returns `None` if no user has the given id.
    async fn update(&self, user: User) -> Result<Option<User>>;

    /// Delete a user, returning it if it existed
    async fn delete(&self, id: &str) -> Result<Option<User>>;
}

/// Storage backend exposing the repositories
pub trait StorageProvider: Send + Sync {
    /// Role repository
    fn roles(&self) -> Arc<dyn RoleRepository>;

    /// User repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}

//! In-memory document storage
//!
//! Repositories backed by `DashMap`, with unique indexes enforced through
//! the map entry API so concurrent writers cannot both claim a value.

use std::sync::Arc;

use async_trait::async_trait;
use charisma_domain::entities::{Role, User};
use charisma_domain::error::{Error, Result};
use charisma_domain::ports::{RoleRepository, StorageProvider, UserRepository};
use charisma_domain::value_objects::{Page, Pagination, RoleFilter, UserFilter};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Unique secondary index from a value to the owning document id
struct UniqueIndex {
    name: &'static str,
    owners: DashMap<String, String>,
}

impl UniqueIndex {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            owners: DashMap::new(),
        }
    }

    /// Claim `value` for `id`; a no-op if `id` already owns it
    fn claim(&self, value: &str, id: &str) -> Result<()> {
        match self.owners.entry(value.to_string()) {
            Entry::Occupied(entry) if entry.get() != id => Err(Error::conflict(format!(
                "{} '{value}' is already taken",
                self.name
            ))),
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(entry) => {
                entry.insert(id.to_string());
                Ok(())
            }
        }
    }

    fn release(&self, value: &str, id: &str) {
        self.owners.remove_if(value, |_, owner| owner == id);
    }

    fn owner(&self, value: &str) -> Option<String> {
        self.owners.get(value).map(|o| o.value().clone())
    }
}

/// Move a unique claim from `old` to `new`
fn reclaim(index: &UniqueIndex, old: Option<&str>, new: Option<&str>, id: &str) -> Result<()> {
    if old == new {
        return Ok(());
    }
    if let Some(new) = new {
        index.claim(new, id)?;
    }
    if let Some(old) = old {
        index.release(old, id);
    }
    Ok(())
}

/// In-memory role repository
pub struct MemoryRoleRepository {
    roles: DashMap<String, Role>,
    names: UniqueIndex,
}

impl Default for MemoryRoleRepository {
    fn default() -> Self {
        Self {
            roles: DashMap::new(),
            names: UniqueIndex::new("role name"),
        }
    }
}

#[async_trait]
impl RoleRepository for MemoryRoleRepository {
    async fn insert(&self, role: Role) -> Result<Role> {
        self.names.claim(&role.name, &role.id)?;
        self.roles.insert(role.id.clone(), role.clone());
        Ok(role)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Role>> {
        Ok(self.roles.get(id).map(|r| r.value().clone()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>> {
        Ok(self
            .names
            .owner(name)
            .and_then(|id| self.roles.get(&id).map(|r| r.value().clone())))
    }

    async fn list(&self, filter: &RoleFilter, page: Pagination) -> Result<Page<Role>> {
        let mut matching: Vec<Role> = self
            .roles
            .iter()
            .filter(|r| filter.matches(r.value()))
            .map(|r| r.value().clone())
            .collect();
        matching.sort_by(|a, b| filter.compare(a, b));
        Ok(Page::slice(matching, page))
    }

    async fn update(&self, role: Role) -> Result<Option<Role>> {
        // The entry guard serializes writers of one document across the
        // index move and the write.
        let Some(mut stored) = self.roles.get_mut(&role.id) else {
            return Ok(None);
        };
        reclaim(
            &self.names,
            Some(stored.name.as_str()),
            Some(role.name.as_str()),
            &role.id,
        )?;
        *stored = role.clone();
        Ok(Some(role))
    }

    async fn delete(&self, id: &str) -> Result<Option<Role>> {
        Ok(self.roles.remove(id).map(|(_, role)| {
            self.names.release(&role.name, &role.id);
            role
        }))
    }
}

/// In-memory user repository
pub struct MemoryUserRepository {
    users: DashMap<String, User>,
    emails: UniqueIndex,
    phones: UniqueIndex,
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self {
            users: DashMap::new(),
            emails: UniqueIndex::new("email"),
            phones: UniqueIndex::new("phone"),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: User) -> Result<User> {
        self.phones.claim(&user.phone, &user.id)?;
        if let Some(email) = &user.email {
            if let Err(e) = self.emails.claim(email, &user.id) {
                self.phones.release(&user.phone, &user.id);
                return Err(e);
            }
        }
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }

    async fn list(&self, filter: &UserFilter, page: Pagination) -> Result<Page<User>> {
        let mut matching: Vec<User> = self
            .users
            .iter()
            .filter(|u| filter.matches(u.value()))
            .map(|u| u.value().clone())
            .collect();
        matching.sort_by(|a, b| filter.compare(a, b));
        Ok(Page::slice(matching, page))
    }

    async fn update(&self, user: User) -> Result<Option<User>> {
        let Some(mut stored) = self.users.get_mut(&user.id) else {
            return Ok(None);
        };
        reclaim(
            &self.phones,
            Some(stored.phone.as_str()),
            Some(user.phone.as_str()),
            &user.id,
        )?;
        if let Err(e) = reclaim(
            &self.emails,
            stored.email.as_deref(),
            user.email.as_deref(),
            &user.id,
        ) {
            // Undo the phone move
            reclaim(
                &self.phones,
                Some(user.phone.as_str()),
                Some(stored.phone.as_str()),
                &user.id,
            )?;
            return Err(e);
        }
        *stored = user.clone();
        Ok(Some(user))
    }

    async fn delete(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.remove(id).map(|(_, user)| {
            self.phones.release(&user.phone, &user.id);
            if let Some(email) = &user.email {
                self.emails.release(email, &user.id);
            }
            user
        }))
    }
}

/// In-memory storage backend
#[derive(Clone, Default)]
pub struct MemoryStorageProvider {
    roles: Arc<MemoryRoleRepository>,
    users: Arc<MemoryUserRepository>,
}

impl MemoryStorageProvider {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageProvider for MemoryStorageProvider {
    fn roles(&self) -> Arc<dyn RoleRepository> {
        self.roles.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

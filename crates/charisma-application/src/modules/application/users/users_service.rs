//! Users service
//!
//! Business rules for user accounts. Registered as `usersService`;
//! depends on `storageService` and `passwordsService`.

use std::sync::Arc;

use charisma_domain::constants::{PASSWORDS_SERVICE_KEY, STORAGE_SERVICE_KEY};
use charisma_domain::entities::{User, UserStatus};
use charisma_domain::error::{Error, Result};
use charisma_domain::ports::{PasswordHasher, RoleRepository, StorageProvider, UserRepository};
use charisma_domain::value_objects::{Page, Pagination, UserFilter};

use super::users_dtos::{CreateUserRequest, UpdateUserRequest};
use crate::registry::{Constructible, Instance};

/// User use cases
pub struct UsersService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    passwords: Arc<dyn PasswordHasher>,
}

fn normalize_email(email: Option<String>) -> Option<String> {
    email.map(|e| e.trim().to_lowercase())
}

impl UsersService {
    /// Create the service
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        passwords: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            roles,
            passwords,
        }
    }

    /// List users with filtering, sorting and pagination
    pub async fn get_all_users(&self, filter: &UserFilter, page: Pagination) -> Result<Page<User>> {
        self.users.list(filter, page).await
    }

    /// Get a user by id
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        self.users.find_by_id(id).await
    }

    /// Create a user assigned to an existing role
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        self.ensure_role_exists(&request.role).await?;
        let mut user = User::new(request.first_name.trim(), request.phone.trim(), request.role);
        user.last_name = request.last_name.map(|l| l.trim().to_string());
        user.email = normalize_email(request.email);
        user.password = request
            .password
            .map(|p| self.passwords.hash(&p))
            .transpose()?;
        user.date_of_birth = request.date_of_birth;
        user.address = request.address.map(Into::into);
        user.profile_picture = request.profile_picture;
        if let Some(status) = request.status {
            user.status = status;
        }
        self.users.insert(user).await
    }

    /// Apply a partial update
    pub async fn update_user(&self, id: &str, update: UpdateUserRequest) -> Result<Option<User>> {
        let Some(mut user) = self.users.find_by_id(id).await? else {
            return Ok(None);
        };
        if let Some(role) = update.role {
            if role != user.role {
                self.ensure_role_exists(&role).await?;
            }
            user.role = role;
        }
        if let Some(first_name) = update.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = update.last_name {
            user.last_name = Some(last_name.trim().to_string());
        }
        if update.email.is_some() {
            user.email = normalize_email(update.email);
        }
        if let Some(phone) = update.phone {
            user.phone = phone.trim().to_string();
        }
        if let Some(password) = update.password {
            user.password = Some(self.passwords.hash(&password)?);
        }
        if update.date_of_birth.is_some() {
            user.date_of_birth = update.date_of_birth;
        }
        if let Some(address) = update.address {
            user.address = Some(address.into());
        }
        if update.profile_picture.is_some() {
            user.profile_picture = update.profile_picture;
        }
        if let Some(status) = update.status {
            user.status = status;
        }
        user.touch();
        self.users.update(user).await
    }

    /// Delete a user, returning it if it existed
    pub async fn delete_user(&self, id: &str) -> Result<Option<User>> {
        self.users.delete(id).await
    }

    /// Set a user's status to disabled
    pub async fn disable_user(&self, id: &str) -> Result<Option<User>> {
        let Some(mut user) = self.users.find_by_id(id).await? else {
            return Ok(None);
        };
        user.status = UserStatus::Disabled;
        user.touch();
        self.users.update(user).await
    }

    async fn ensure_role_exists(&self, role_id: &str) -> Result<()> {
        match self.roles.find_by_id(role_id).await? {
            Some(_) => Ok(()),
            None => Err(Error::invalid_argument(format!(
                "role '{role_id}' does not exist"
            ))),
        }
    }
}

fn load() -> Result<Constructible> {
    Ok(Constructible::new(|deps| {
        let storage = deps.get::<dyn StorageProvider>(STORAGE_SERVICE_KEY)?;
        let passwords = deps.get::<dyn PasswordHasher>(PASSWORDS_SERVICE_KEY)?;
        Ok(Instance::of(Arc::new(UsersService::new(
            storage.users(),
            storage.roles(),
            passwords,
        ))))
    })
    .depends_on(&[STORAGE_SERVICE_KEY, PASSWORDS_SERVICE_KEY]))
}

crate::register_module!(load);

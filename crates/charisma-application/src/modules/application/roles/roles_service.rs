//! Roles service
//!
//! Business rules for roles on top of the storage port. Registered as
//! `rolesService`; depends on `storageService`.

use std::sync::Arc;

use charisma_domain::constants::STORAGE_SERVICE_KEY;
use charisma_domain::entities::{Role, RoleStatus};
use charisma_domain::error::{Error, Result};
use charisma_domain::ports::{RoleRepository, StorageProvider};
use charisma_domain::value_objects::{Page, Pagination, RoleFilter};

use super::roles_dtos::{CreateRoleRequest, UpdateRoleRequest};
use crate::registry::{Constructible, Instance};

/// Role use cases
pub struct RolesService {
    roles: Arc<dyn RoleRepository>,
}

impl RolesService {
    /// Create the service over a role repository
    pub fn new(roles: Arc<dyn RoleRepository>) -> Self {
        Self { roles }
    }

    /// List roles with filtering, sorting and pagination
    pub async fn get_all_roles(&self, filter: &RoleFilter, page: Pagination) -> Result<Page<Role>> {
        self.roles.list(filter, page).await
    }

    /// Get a role by id
    pub async fn get_role_by_id(&self, id: &str) -> Result<Option<Role>> {
        self.roles.find_by_id(id).await
    }

    /// Create a role, rejecting duplicate names
    pub async fn create_role(&self, request: CreateRoleRequest) -> Result<Role> {
        if self.role_name_exists(&request.name, None).await? {
            return Err(Error::conflict(format!(
                "role name '{}' is already taken",
                request.name
            )));
        }
        let mut role = Role::new(request.name);
        role.status = request.status;
        role.created_by = Some(request.created_by);
        role.permissions = request.permissions;
        role.business_id = request.business_id;
        self.roles.insert(role).await
    }

    /// Apply a partial update
    pub async fn update_role(&self, id: &str, update: UpdateRoleRequest) -> Result<Option<Role>> {
        let Some(mut role) = self.roles.find_by_id(id).await? else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            if name != role.name && self.role_name_exists(&name, Some(id)).await? {
                return Err(Error::conflict(format!("role name '{name}' is already taken")));
            }
            role.name = name;
        }
        if let Some(status) = update.status {
            role.status = status;
        }
        if let Some(permissions) = update.permissions {
            role.permissions = permissions;
        }
        if update.business_id.is_some() {
            role.business_id = update.business_id;
        }
        role.touch();
        self.roles.update(role).await
    }

    /// Delete a role, returning it if it existed
    pub async fn delete_role(&self, id: &str) -> Result<Option<Role>> {
        self.roles.delete(id).await
    }

    /// Set a role's status to disabled
    pub async fn disable_role(&self, id: &str) -> Result<Option<Role>> {
        self.modify(id, |role| role.status = RoleStatus::Disabled)
            .await
    }

    /// List the roles of a business
    pub async fn get_roles_by_business_id(
        &self,
        business_id: &str,
        filter: RoleFilter,
        page: Pagination,
    ) -> Result<Page<Role>> {
        let filter = RoleFilter {
            business_id: Some(business_id.to_string()),
            ..filter
        };
        self.roles.list(&filter, page).await
    }

    /// List the roles created by a user
    pub async fn get_roles_by_created_by(
        &self,
        created_by: &str,
        filter: RoleFilter,
        page: Pagination,
    ) -> Result<Page<Role>> {
        let filter = RoleFilter {
            created_by: Some(created_by.to_string()),
            ..filter
        };
        self.roles.list(&filter, page).await
    }

    /// Whether another role already uses `name`
    pub async fn role_name_exists(&self, name: &str, exclude_id: Option<&str>) -> Result<bool> {
        Ok(self
            .roles
            .find_by_name(name)
            .await?
            .is_some_and(|role| Some(role.id.as_str()) != exclude_id))
    }

    /// Get a role by exact name
    pub async fn get_role_by_name(&self, name: &str) -> Result<Option<Role>> {
        self.roles.find_by_name(name).await
    }

    /// Replace a role's permissions
    pub async fn update_role_permissions(
        &self,
        id: &str,
        permissions: Vec<String>,
    ) -> Result<Option<Role>> {
        self.modify(id, move |role| role.permissions = permissions)
            .await
    }

    /// List the roles granting a permission
    pub async fn get_roles_by_permission(
        &self,
        permission: &str,
        filter: RoleFilter,
        page: Pagination,
    ) -> Result<Page<Role>> {
        let filter = RoleFilter {
            permission: Some(permission.to_string()),
            ..filter
        };
        self.roles.list(&filter, page).await
    }

    async fn modify<F>(&self, id: &str, apply: F) -> Result<Option<Role>>
    where
        F: FnOnce(&mut Role) + Send,
    {
        let Some(mut role) = self.roles.find_by_id(id).await? else {
            return Ok(None);
        };
        apply(&mut role);
        role.touch();
        self.roles.update(role).await
    }
}

fn load() -> Result<Constructible> {
    Ok(Constructible::new(|deps| {
        let storage = deps.get::<dyn StorageProvider>(STORAGE_SERVICE_KEY)?;
        Ok(Instance::of(Arc::new(RolesService::new(storage.roles()))))
    })
    .depends_on(&[STORAGE_SERVICE_KEY]))
}

crate::register_module!(load);

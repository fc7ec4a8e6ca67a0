//! Roles controller
//!
//! HTTP-facing role methods. Reads go through the cache; writes answer
//! immediately and invalidate cached entries on the background task queue.

use std::sync::Arc;

use async_trait::async_trait;
use charisma_domain::constants::{
    CACHE_SERVICE_KEY, LIST_CACHE_TTL_SECS, ROLES_SERVICE_KEY, SINGLE_CACHE_TTL_SECS,
    TASKS_SERVICE_KEY,
};
use charisma_domain::entities::Role;
use charisma_domain::error::{Error, Result};
use charisma_domain::ports::{CacheProvider, TaskQueue};

use super::roles_constants::{
    CACHE_LIST_PATTERNS, CACHE_NAME_PREFIX, CACHE_SINGLE_PREFIX, CREATE_ROLE, DELETE_ROLE,
    DISABLE_ROLE, GET_ALL_ROLES, GET_ROLE_BY_ID, GET_ROLE_BY_NAME, GET_ROLES_BY_BUSINESS_ID,
    GET_ROLES_BY_CREATED_BY, GET_ROLES_BY_PERMISSION, METHODS, ROLE_NOT_FOUND, UPDATE_ROLE,
    UPDATE_ROLE_PERMISSIONS,
};
use super::roles_dtos::{
    CreateRoleRequest, RoleList, RoleListQuery, UpdatePermissionsRequest, UpdateRoleRequest,
};
use super::roles_service::RolesService;
use crate::cache::SharedCache;
use crate::dispatch::{Controller, Reply, RequestContext};
use crate::registry::{Constructible, Instance};
use crate::validation::validated;

/// Controller for `/roles` routes
pub struct RolesController {
    roles: Arc<RolesService>,
    cache: SharedCache,
    tasks: Arc<dyn TaskQueue>,
}

impl RolesController {
    /// Create the controller
    pub fn new(roles: Arc<RolesService>, cache: SharedCache, tasks: Arc<dyn TaskQueue>) -> Self {
        Self {
            roles,
            cache,
            tasks,
        }
    }

    async fn get_all_roles(&self, ctx: &RequestContext) -> Result<Reply> {
        let query = RoleListQuery::from_context(ctx)?;
        let key = format!("roles:list:{}", query.key_segments());
        if let Some(cached) = self.cache.get::<RoleList>(&key).await {
            return Reply::ok(&cached);
        }
        let list = RoleList::from(
            self.roles
                .get_all_roles(&query.filter(), query.pagination())
                .await?,
        );
        self.cache.set(&key, &list, LIST_CACHE_TTL_SECS).await;
        Reply::ok(&list)
    }

    async fn get_role_by_id(&self, ctx: &RequestContext) -> Result<Reply> {
        let id = ctx.param("id")?;
        let key = format!("{CACHE_SINGLE_PREFIX}{id}");
        if let Some(cached) = self.cache.get::<Role>(&key).await {
            return Reply::ok(&cached);
        }
        match self.roles.get_role_by_id(id).await? {
            Some(role) => {
                self.cache.set(&key, &role, SINGLE_CACHE_TTL_SECS).await;
                Reply::ok(&role)
            }
            None => Ok(Reply::not_found(ROLE_NOT_FOUND)),
        }
    }

    async fn create_role(&self, ctx: &RequestContext) -> Result<Reply> {
        let request = validated(ctx.body_as::<CreateRoleRequest>()?)?;
        let role = self.roles.create_role(request).await?;
        self.invalidate("roles.create", None, &[]);
        Reply::created(&role)
    }

    async fn update_role(&self, ctx: &RequestContext) -> Result<Reply> {
        let id = ctx.param("id")?;
        let request = validated(ctx.body_as::<UpdateRoleRequest>()?)?;
        let previous = self.roles.get_role_by_id(id).await?;
        match self.roles.update_role(id, request).await? {
            Some(role) => {
                let mut names = vec![role.name.clone()];
                names.extend(previous.map(|p| p.name));
                self.invalidate("roles.update", Some(id), &names);
                Reply::ok(&role)
            }
            None => Ok(Reply::not_found(ROLE_NOT_FOUND)),
        }
    }

    async fn delete_role(&self, ctx: &RequestContext) -> Result<Reply> {
        let id = ctx.param("id")?;
        match self.roles.delete_role(id).await? {
            Some(role) => {
                self.invalidate("roles.delete", Some(id), &[role.name]);
                Ok(Reply::no_content())
            }
            None => Ok(Reply::not_found(ROLE_NOT_FOUND)),
        }
    }

    async fn disable_role(&self, ctx: &RequestContext) -> Result<Reply> {
        let id = ctx.param("id")?;
        match self.roles.disable_role(id).await? {
            Some(role) => {
                self.invalidate("roles.disable", Some(id), &[role.name.clone()]);
                Reply::ok(&role)
            }
            None => Ok(Reply::not_found(ROLE_NOT_FOUND)),
        }
    }

    async fn get_roles_by_business_id(&self, ctx: &RequestContext) -> Result<Reply> {
        let business_id = ctx.param("businessId")?;
        let query = RoleListQuery::from_context(ctx)?;
        let key = format!("roles:business:{business_id}:{}", query.key_segments());
        if let Some(cached) = self.cache.get::<RoleList>(&key).await {
            return Reply::ok(&cached);
        }
        let list = RoleList::from(
            self.roles
                .get_roles_by_business_id(business_id, query.filter(), query.pagination())
                .await?,
        );
        self.cache.set(&key, &list, LIST_CACHE_TTL_SECS).await;
        Reply::ok(&list)
    }

    async fn get_roles_by_created_by(&self, ctx: &RequestContext) -> Result<Reply> {
        let user_id = ctx.param("userId")?;
        let query = RoleListQuery::from_context(ctx)?;
        let key = format!("roles:created-by:{user_id}:{}", query.key_segments());
        if let Some(cached) = self.cache.get::<RoleList>(&key).await {
            return Reply::ok(&cached);
        }
        let list = RoleList::from(
            self.roles
                .get_roles_by_created_by(user_id, query.filter(), query.pagination())
                .await?,
        );
        self.cache.set(&key, &list, LIST_CACHE_TTL_SECS).await;
        Reply::ok(&list)
    }

    async fn get_role_by_name(&self, ctx: &RequestContext) -> Result<Reply> {
        let name = ctx.param("name")?;
        let key = format!("{CACHE_NAME_PREFIX}{name}");
        if let Some(cached) = self.cache.get::<Role>(&key).await {
            return Reply::ok(&cached);
        }
        match self.roles.get_role_by_name(name).await? {
            Some(role) => {
                self.cache.set(&key, &role, SINGLE_CACHE_TTL_SECS).await;
                Reply::ok(&role)
            }
            None => Ok(Reply::not_found(ROLE_NOT_FOUND)),
        }
    }

    async fn update_role_permissions(&self, ctx: &RequestContext) -> Result<Reply> {
        let id = ctx.param("id")?;
        let request = validated(ctx.body_as::<UpdatePermissionsRequest>()?)?;
        match self
            .roles
            .update_role_permissions(id, request.permissions)
            .await?
        {
            Some(role) => {
                self.invalidate("roles.permissions", Some(id), &[role.name.clone()]);
                Reply::ok(&role)
            }
            None => Ok(Reply::not_found(ROLE_NOT_FOUND)),
        }
    }

    async fn get_roles_by_permission(&self, ctx: &RequestContext) -> Result<Reply> {
        let permission = ctx.param("permission")?;
        let query = RoleListQuery::from_context(ctx)?;
        let key = format!("roles:permission:{permission}:{}", query.key_segments());
        if let Some(cached) = self.cache.get::<RoleList>(&key).await {
            return Reply::ok(&cached);
        }
        let list = RoleList::from(
            self.roles
                .get_roles_by_permission(permission, query.filter(), query.pagination())
                .await?,
        );
        self.cache.set(&key, &list, LIST_CACHE_TTL_SECS).await;
        Reply::ok(&list)
    }

    /// Queue cache invalidation for a write
    fn invalidate(&self, task: &'static str, id: Option<&str>, names: &[String]) {
        let mut keys: Vec<String> = names
            .iter()
            .map(|name| format!("{CACHE_NAME_PREFIX}{name}"))
            .collect();
        keys.extend(id.map(|id| format!("{CACHE_SINGLE_PREFIX}{id}")));
        let cache = self.cache.clone();
        self.tasks.submit(
            task,
            Box::pin(async move { cache.invalidate(&keys, CACHE_LIST_PATTERNS).await }),
        );
    }
}

#[async_trait]
impl Controller for RolesController {
    async fn handle(&self, method: &str, ctx: RequestContext) -> Result<Reply> {
        match method {
            GET_ALL_ROLES => self.get_all_roles(&ctx).await,
            GET_ROLE_BY_ID => self.get_role_by_id(&ctx).await,
            CREATE_ROLE => self.create_role(&ctx).await,
            UPDATE_ROLE => self.update_role(&ctx).await,
            DELETE_ROLE => self.delete_role(&ctx).await,
            DISABLE_ROLE => self.disable_role(&ctx).await,
            GET_ROLES_BY_BUSINESS_ID => self.get_roles_by_business_id(&ctx).await,
            GET_ROLES_BY_CREATED_BY => self.get_roles_by_created_by(&ctx).await,
            GET_ROLE_BY_NAME => self.get_role_by_name(&ctx).await,
            UPDATE_ROLE_PERMISSIONS => self.update_role_permissions(&ctx).await,
            GET_ROLES_BY_PERMISSION => self.get_roles_by_permission(&ctx).await,
            other => Err(Error::method_not_found("rolesController", other)),
        }
    }
}

fn load() -> Result<Constructible> {
    Ok(Constructible::new(|deps| {
        let controller = RolesController::new(
            deps.get::<RolesService>(ROLES_SERVICE_KEY)?,
            SharedCache::new(deps.get::<dyn CacheProvider>(CACHE_SERVICE_KEY)?),
            deps.get::<dyn TaskQueue>(TASKS_SERVICE_KEY)?,
        );
        Ok(Instance::of::<dyn Controller>(Arc::new(controller)))
    })
    .depends_on(&[ROLES_SERVICE_KEY, CACHE_SERVICE_KEY, TASKS_SERVICE_KEY])
    .with_methods(METHODS))
}

crate::register_module!(load);

//! Users controller
//!
//! HTTP-facing user methods, including the `me` variants that act on the
//! authenticated caller. Writes answer immediately; cache invalidation and
//! outbound emails/notifications run on the background task queue.

use std::sync::Arc;

use async_trait::async_trait;
use charisma_domain::constants::{
    CACHE_SERVICE_KEY, EMAILS_SERVICE_KEY, LIST_CACHE_TTL_SECS, ME_CACHE_TTL_SECS,
    NOTIFICATIONS_SERVICE_KEY, SINGLE_CACHE_TTL_SECS, TASKS_SERVICE_KEY, USERS_SERVICE_KEY,
};
use charisma_domain::entities::User;
use charisma_domain::error::{Error, Result};
use charisma_domain::ports::{CacheProvider, EmailSender, NotificationSender, TaskQueue};

use super::users_constants::{
    CACHE_LIST_PATTERN, CACHE_ME_PREFIX, CACHE_SINGLE_PREFIX, CREATE_USER, DELETE_USER,
    DISABLE_ME, DISABLE_USER, GET_ALL_USERS, GET_ME, GET_USER_BY_ID, METHODS, UPDATE_ME,
    UPDATE_USER, USER_NOT_FOUND,
};
use super::users_dtos::{
    CreateUserRequest, UpdateMeRequest, UpdateUserRequest, UserList, UserListQuery,
};
use super::users_service::UsersService;
use crate::cache::SharedCache;
use crate::dispatch::{Controller, Reply, RequestContext};
use crate::registry::{Constructible, Instance};
use crate::validation::validated;

/// Controller for `/users` routes
pub struct UsersController {
    users: Arc<UsersService>,
    cache: SharedCache,
    tasks: Arc<dyn TaskQueue>,
    emails: Arc<dyn EmailSender>,
    notifications: Arc<dyn NotificationSender>,
}

impl UsersController {
    /// Create the controller
    pub fn new(
        users: Arc<UsersService>,
        cache: SharedCache,
        tasks: Arc<dyn TaskQueue>,
        emails: Arc<dyn EmailSender>,
        notifications: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            users,
            cache,
            tasks,
            emails,
            notifications,
        }
    }

    async fn get_all_users(&self, ctx: &RequestContext) -> Result<Reply> {
        let query = UserListQuery::from_context(ctx)?;
        let key = query.cache_key();
        if let Some(cached) = self.cache.get::<UserList>(&key).await {
            return Reply::ok(&cached);
        }
        let list = UserList::from(
            self.users
                .get_all_users(&query.filter()?, query.pagination())
                .await?,
        );
        self.cache.set(&key, &list, LIST_CACHE_TTL_SECS).await;
        Reply::ok(&list)
    }

    async fn get_user_by_id(&self, ctx: &RequestContext) -> Result<Reply> {
        let id = ctx.param("id")?;
        self.cached_user(&format!("{CACHE_SINGLE_PREFIX}{id}"), id, SINGLE_CACHE_TTL_SECS)
            .await
    }

    async fn create_user(&self, ctx: &RequestContext) -> Result<Reply> {
        let request = validated(ctx.body_as::<CreateUserRequest>()?)?;
        let user = self.users.create_user(request).await?;

        let cache = self.cache.clone();
        let emails = Arc::clone(&self.emails);
        let notifications = Arc::clone(&self.notifications);
        let (user_id, email, first_name) =
            (user.id.clone(), user.email.clone(), user.first_name.clone());
        self.tasks.submit(
            "users.create",
            Box::pin(async move {
                cache.delete_pattern(CACHE_LIST_PATTERN).await?;
                if let Some(email) = email {
                    emails.send_welcome_email(&email, &first_name).await?;
                }
                notifications.send_welcome_notification(&user_id).await
            }),
        );
        Reply::created(&user)
    }

    async fn update_user(&self, ctx: &RequestContext) -> Result<Reply> {
        let id = ctx.param("id")?;
        let request = validated(ctx.body_as::<UpdateUserRequest>()?)?;
        self.apply_update("users.update", id, request).await
    }

    async fn delete_user(&self, ctx: &RequestContext) -> Result<Reply> {
        let id = ctx.param("id")?;
        match self.users.delete_user(id).await? {
            Some(_) => {
                self.invalidate("users.delete", id, false);
                Ok(Reply::no_content())
            }
            None => Ok(Reply::not_found(USER_NOT_FOUND)),
        }
    }

    async fn disable_user(&self, ctx: &RequestContext) -> Result<Reply> {
        let id = ctx.param("id")?;
        self.apply_disable("users.disable", id).await
    }

    async fn get_me(&self, ctx: &RequestContext) -> Result<Reply> {
        let id = &ctx.require_identity()?.subject;
        self.cached_user(&format!("{CACHE_ME_PREFIX}{id}"), id, ME_CACHE_TTL_SECS)
            .await
    }

    async fn update_me(&self, ctx: &RequestContext) -> Result<Reply> {
        let id = &ctx.require_identity()?.subject;
        let request = validated(ctx.body_as::<UpdateMeRequest>()?)?;
        self.apply_update("users.update_me", id, request.into())
            .await
    }

    async fn disable_me(&self, ctx: &RequestContext) -> Result<Reply> {
        let id = &ctx.require_identity()?.subject;
        self.apply_disable("users.disable_me", id).await
    }

    async fn cached_user(&self, key: &str, id: &str, ttl_secs: u64) -> Result<Reply> {
        if let Some(cached) = self.cache.get::<User>(key).await {
            return Reply::ok(&cached);
        }
        match self.users.get_user_by_id(id).await? {
            Some(user) => {
                self.cache.set(key, &user, ttl_secs).await;
                Reply::ok(&user)
            }
            None => Ok(Reply::not_found(USER_NOT_FOUND)),
        }
    }

    async fn apply_update(
        &self,
        task: &'static str,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<Reply> {
        match self.users.update_user(id, request).await? {
            Some(user) => {
                self.invalidate(task, id, false);
                Reply::ok(&user)
            }
            None => Ok(Reply::not_found(USER_NOT_FOUND)),
        }
    }

    async fn apply_disable(&self, task: &'static str, id: &str) -> Result<Reply> {
        match self.users.disable_user(id).await? {
            Some(user) => {
                self.invalidate(task, id, true);
                Reply::ok(&user)
            }
            None => Ok(Reply::not_found(USER_NOT_FOUND)),
        }
    }

    /// Queue cache invalidation for a user write, optionally followed by the
    /// account-disabled notification
    fn invalidate(&self, task: &'static str, id: &str, notify_disabled: bool) {
        let keys = vec![
            format!("{CACHE_SINGLE_PREFIX}{id}"),
            format!("{CACHE_ME_PREFIX}{id}"),
        ];
        let cache = self.cache.clone();
        let notifications = Arc::clone(&self.notifications);
        let user_id = id.to_string();
        self.tasks.submit(
            task,
            Box::pin(async move {
                cache.invalidate(&keys, &[CACHE_LIST_PATTERN]).await?;
                if notify_disabled {
                    notifications
                        .send_account_disabled_notification(&user_id)
                        .await?;
                }
                Ok(())
            }),
        );
    }
}

#[async_trait]
impl Controller for UsersController {
    async fn handle(&self, method: &str, ctx: RequestContext) -> Result<Reply> {
        match method {
            GET_ALL_USERS => self.get_all_users(&ctx).await,
            GET_USER_BY_ID => self.get_user_by_id(&ctx).await,
            CREATE_USER => self.create_user(&ctx).await,
            UPDATE_USER => self.update_user(&ctx).await,
            DELETE_USER => self.delete_user(&ctx).await,
            DISABLE_USER => self.disable_user(&ctx).await,
            GET_ME => self.get_me(&ctx).await,
            UPDATE_ME => self.update_me(&ctx).await,
            DISABLE_ME => self.disable_me(&ctx).await,
            other => Err(Error::method_not_found("usersController", other)),
        }
    }
}

fn load() -> Result<Constructible> {
    Ok(Constructible::new(|deps| {
        let controller = UsersController::new(
            deps.get::<UsersService>(USERS_SERVICE_KEY)?,
            SharedCache::new(deps.get::<dyn CacheProvider>(CACHE_SERVICE_KEY)?),
            deps.get::<dyn TaskQueue>(TASKS_SERVICE_KEY)?,
            deps.get::<dyn EmailSender>(EMAILS_SERVICE_KEY)?,
            deps.get::<dyn NotificationSender>(NOTIFICATIONS_SERVICE_KEY)?,
        );
        Ok(Instance::of::<dyn Controller>(Arc::new(controller)))
    })
    .depends_on(&[
        USERS_SERVICE_KEY,
        CACHE_SERVICE_KEY,
        TASKS_SERVICE_KEY,
        EMAILS_SERVICE_KEY,
        NOTIFICATIONS_SERVICE_KEY,
    ])
    .with_methods(METHODS))
}

crate::register_module!(load);

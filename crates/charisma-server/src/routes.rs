//! Route tables
//!
//! Each row binds an HTTP verb and path to a controller registration key
//! and method name. Tables are checked against the container before the
//! server starts: every key must be registered and every method declared by
//! its constructible.

use std::collections::BTreeSet;

use charisma_application::modules::application::roles::roles_constants as roles;
use charisma_application::modules::application::users::users_constants as users;
use charisma_domain::constants::{ROLES_CONTROLLER_KEY, USERS_CONTROLLER_KEY};
use charisma_domain::error::{Error, Result};
use charisma_infrastructure::di::Container;
use rocket::Route;
use rocket::http::Method;
use tracing::info;

use crate::dispatch::ControllerRoute;

/// One row of a route table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    /// HTTP verb
    pub verb: Method,
    /// Rocket path pattern, `<name>` for parameters
    pub path: &'static str,
    /// Controller registration key
    pub key: &'static str,
    /// Controller method name
    pub method: &'static str,
}

impl RouteSpec {
    /// Create a route table row
    pub const fn new(
        verb: Method,
        path: &'static str,
        key: &'static str,
        method: &'static str,
    ) -> Self {
        Self {
            verb,
            path,
            key,
            method,
        }
    }
}

const fn role(verb: Method, path: &'static str, method: &'static str) -> RouteSpec {
    RouteSpec::new(verb, path, ROLES_CONTROLLER_KEY, method)
}

const fn user(verb: Method, path: &'static str, method: &'static str) -> RouteSpec {
    RouteSpec::new(verb, path, USERS_CONTROLLER_KEY, method)
}

/// `/roles` routes
pub const ROLE_ROUTES: &[RouteSpec] = &[
    role(Method::Get, "/roles", roles::GET_ALL_ROLES),
    role(Method::Post, "/roles", roles::CREATE_ROLE),
    role(Method::Get, "/roles/business/<businessId>", roles::GET_ROLES_BY_BUSINESS_ID),
    role(Method::Get, "/roles/created-by/<userId>", roles::GET_ROLES_BY_CREATED_BY),
    role(Method::Get, "/roles/name/<name>", roles::GET_ROLE_BY_NAME),
    role(Method::Get, "/roles/permission/<permission>", roles::GET_ROLES_BY_PERMISSION),
    role(Method::Get, "/roles/<id>", roles::GET_ROLE_BY_ID),
    role(Method::Patch, "/roles/<id>", roles::UPDATE_ROLE),
    role(Method::Delete, "/roles/<id>", roles::DELETE_ROLE),
    role(Method::Patch, "/roles/<id>/disable", roles::DISABLE_ROLE),
    role(Method::Patch, "/roles/<id>/permissions", roles::UPDATE_ROLE_PERMISSIONS),
];

/// `/users` routes
pub const USER_ROUTES: &[RouteSpec] = &[
    user(Method::Get, "/users", users::GET_ALL_USERS),
    user(Method::Post, "/users", users::CREATE_USER),
    user(Method::Get, "/users/me", users::GET_ME),
    user(Method::Patch, "/users/me", users::UPDATE_ME),
    user(Method::Patch, "/users/me/disable", users::DISABLE_ME),
    user(Method::Get, "/users/<id>", users::GET_USER_BY_ID),
    user(Method::Patch, "/users/<id>", users::UPDATE_USER),
    user(Method::Delete, "/users/<id>", users::DELETE_USER),
    user(Method::Patch, "/users/<id>/disable", users::DISABLE_USER),
];

/// Every table the server mounts
pub const ROUTE_TABLES: &[&[RouteSpec]] = &[ROLE_ROUTES, USER_ROUTES];

/// Build Rocket routes for the given tables
pub fn controller_routes(tables: &[&[RouteSpec]]) -> Vec<Route> {
    tables
        .iter()
        .flat_map(|table| table.iter())
        .map(|spec| {
            let mut route = Route::new(spec.verb, spec.path, ControllerRoute::new(spec));
            route.name = Some(format!("{}::{}", spec.key, spec.method).into());
            route
        })
        .collect()
}

/// Distinct controller keys referenced by the tables
pub fn route_keys(tables: &[&[RouteSpec]]) -> BTreeSet<&'static str> {
    tables
        .iter()
        .flat_map(|table| table.iter().map(|spec| spec.key))
        .collect()
}

/// Check every row against the registry without constructing anything
pub fn validate_routes(container: &Container, tables: &[&[RouteSpec]]) -> Result<()> {
    let mut count = 0_usize;
    for spec in tables.iter().flat_map(|table| table.iter()) {
        let constructible = container.constructible(spec.key)?;
        if !constructible.declares_method(spec.method) {
            return Err(Error::method_not_found(spec.key, spec.method));
        }
        count += 1;
    }
    info!(routes = count, "Route tables validated");
    Ok(())
}

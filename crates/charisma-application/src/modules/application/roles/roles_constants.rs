//! Roles constants

/// Cache key prefix for single roles by id
pub const CACHE_SINGLE_PREFIX: &str = "roles:single:";

/// Cache key prefix for single roles by name
pub const CACHE_NAME_PREFIX: &str = "roles:name:";

/// Cached list families invalidated by every role write
pub const CACHE_LIST_PATTERNS: &[&str] = &[
    "roles:list:*",
    "roles:business:*",
    "roles:created-by:*",
    "roles:permission:*",
];

/// `GET /roles`
pub const GET_ALL_ROLES: &str = "getAllRoles";
/// `GET /roles/<id>`
pub const GET_ROLE_BY_ID: &str = "getRoleById";
/// `POST /roles`
pub const CREATE_ROLE: &str = "createRole";
/// `PATCH /roles/<id>`
pub const UPDATE_ROLE: &str = "updateRole";
/// `DELETE /roles/<id>`
pub const DELETE_ROLE: &str = "deleteRole";
/// `PATCH /roles/<id>/disable`
pub const DISABLE_ROLE: &str = "disableRole";
/// `GET /roles/business/<businessId>`
pub const GET_ROLES_BY_BUSINESS_ID: &str = "getRolesByBusinessId";
/// `GET /roles/created-by/<userId>`
pub const GET_ROLES_BY_CREATED_BY: &str = "getRolesByCreatedBy";
/// `GET /roles/name/<name>`
pub const GET_ROLE_BY_NAME: &str = "getRoleByName";
/// `PATCH /roles/<id>/permissions`
pub const UPDATE_ROLE_PERMISSIONS: &str = "updateRolePermissions";
/// `GET /roles/permission/<permission>`
pub const GET_ROLES_BY_PERMISSION: &str = "getRolesByPermission";

/// Every method the roles controller dispatches
pub const METHODS: &[&str] = &[
    GET_ALL_ROLES,
    GET_ROLE_BY_ID,
    CREATE_ROLE,
    UPDATE_ROLE,
    DELETE_ROLE,
    DISABLE_ROLE,
    GET_ROLES_BY_BUSINESS_ID,
    GET_ROLES_BY_CREATED_BY,
    GET_ROLE_BY_NAME,
    UPDATE_ROLE_PERMISSIONS,
    GET_ROLES_BY_PERMISSION,
];

/// Error message for missing roles
pub const ROLE_NOT_FOUND: &str = "Role not found";

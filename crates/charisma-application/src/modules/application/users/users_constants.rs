//! Users constants

/// Cache key prefix for single users by id
pub const CACHE_SINGLE_PREFIX: &str = "users:single:";

/// Cache key prefix for the current-user document
pub const CACHE_ME_PREFIX: &str = "users:me:";

/// Cached list family invalidated by every user write
pub const CACHE_LIST_PATTERN: &str = "users:list:*";

/// `GET /users`
pub const GET_ALL_USERS: &str = "getAllUsers";
/// `GET /users/<id>`
pub const GET_USER_BY_ID: &str = "getUserById";
/// `POST /users`
pub const CREATE_USER: &str = "createUser";
/// `PATCH /users/<id>`
pub const UPDATE_USER: &str = "updateUser";
/// `DELETE /users/<id>`
pub const DELETE_USER: &str = "deleteUser";
/// `PATCH /users/<id>/disable`
pub const DISABLE_USER: &str = "disableUser";
/// `GET /users/me`
pub const GET_ME: &str = "getMe";
/// `PATCH /users/me`
pub const UPDATE_ME: &str = "updateMe";
/// `PATCH /users/me/disable`
pub const DISABLE_ME: &str = "disableMe";

/// Every method the users controller dispatches
pub const METHODS: &[&str] = &[
    GET_ALL_USERS,
    GET_USER_BY_ID,
    CREATE_USER,
    UPDATE_USER,
    DELETE_USER,
    DISABLE_USER,
    GET_ME,
    UPDATE_ME,
    DISABLE_ME,
];

/// Error message for missing users
pub const USER_NOT_FOUND: &str = "User not found";

/// Accepted phone number shape
pub const PHONE_PATTERN: &str = r"^\+?[\d\s\-\(\)]+$";

/// Minimum password length
pub const PASSWORD_MIN_LENGTH: u64 = 6;

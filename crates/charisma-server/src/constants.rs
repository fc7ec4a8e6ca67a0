//! Server constants

/// Scheme prefix of accepted authorization header values
pub const BEARER_PREFIX: &str = "Bearer ";

/// Server identity reported in the `Server` header
pub const SERVER_IDENT: &str = "charisma";

/// Body message for 5xx replies; details are logged, not returned
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Rocket limit name applied to request bodies
pub const JSON_LIMIT_NAME: &str = "json";

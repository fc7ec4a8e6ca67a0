//! Resource modules (roles, users)

pub mod roles;
pub mod users;

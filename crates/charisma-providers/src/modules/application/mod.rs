//! Application-facing provider modules

pub mod tokens;

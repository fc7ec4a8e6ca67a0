//! Token provider implementations

pub mod jwt;

pub use jwt::JwtTokenService;

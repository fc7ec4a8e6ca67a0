//! Password Hashing Port

use crate::error::Result;

/// One-way password hashing
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing hash string
    fn hash(&self, password: &str) -> Result<String>;

    /// Check a plaintext password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

//! Password hashing using Argon2

use argon2::{
    Argon2, PasswordHasher as _,
    password_hash::{PasswordHash, PasswordVerifier, SaltString, rand_core::OsRng as ArgonOsRng},
};
use charisma_domain::error::{Error, Result};
use charisma_domain::ports::PasswordHasher;

/// Argon2id implementation of [`PasswordHasher`]
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Create a hasher with the default Argon2 parameters
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut ArgonOsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| Error::infrastructure(format!("Password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| Error::authentication(format!("Invalid password hash format: {e}")))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

impl std::fmt::Debug for Argon2PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Argon2PasswordHasher")
    }
}

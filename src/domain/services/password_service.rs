//! Argon2 password hashing for stored credentials.
//!
//! Both operations cost tens of milliseconds of CPU, so request paths go
//! through the `*_blocking_pool` wrappers instead of calling them inline.

use anyhow::{anyhow, Context, Result};
use argon2::password_hash::{
    self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;

pub struct PasswordService;

impl PasswordService {
    /// PHC string for `password` under a fresh random salt.
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|phc| phc.to_string())
            .map_err(|e| anyhow!("argon2 could not hash password: {e}"))
    }

    /// A wrong password is `Ok(false)`. An `Err` means the stored hash
    /// itself is unusable.
    pub fn verify(password: &str, stored: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| anyhow!("stored password hash is malformed: {e}"))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(anyhow!("argon2 could not verify password: {e}")),
        }
    }

    pub async fn hash_on_blocking_pool(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .context("password hashing task failed")?
    }

    pub async fn verify_on_blocking_pool(password: String, stored: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &stored))
            .await
            .context("password verification task failed")?
    }
}

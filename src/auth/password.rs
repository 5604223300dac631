use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::thread_rng;

use crate::error::AppError;

/// Any non-empty password hashes, so legacy credentials can be migrated as they are.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    if password.is_empty() {
        return Err(AppError::bad_request("Password must not be empty"));
    }

    let salt = SaltString::generate(&mut thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| AppError::internal(format!("Password hashing failed: {err}")))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|err| AppError::internal(format!("Invalid password hash: {err}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Checks a login attempt against whatever the `Users.password` column holds.
///
/// Argon2 PHC strings are always verified as hashes. Anything else is only
/// compared verbatim when `allow_plaintext` is set; otherwise it never matches.
pub fn verify_stored_password(
    password: &str,
    stored: &str,
    allow_plaintext: bool,
) -> Result<bool, AppError> {
    if PasswordHash::new(stored).is_ok() {
        return verify_password(password, stored);
    }

    if !allow_plaintext {
        tracing::warn!("stored credential is not an argon2 hash and plaintext is disabled");
        return Ok(false);
    }

    tracing::warn!("comparing legacy plaintext credential; re-hash it with `hash-password`");
    Ok(constant_time_eq(password.as_bytes(), stored.as_bytes()))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

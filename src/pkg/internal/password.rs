use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::prelude::{Error, Result};

/// Hashes a plaintext password into a PHC string (salt included).
pub fn hash(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| Error::Hash)?;
    Ok(digest.to_string())
}

/// Checks a plaintext password against a stored digest. Any failure,
/// including an unparseable digest, reads as a mismatch.
pub fn verify(password: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

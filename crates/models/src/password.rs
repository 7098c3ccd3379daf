use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::Rng;

pub use argon2::password_hash::Error as HashError;

/// Hashes a raw password with Argon2id and a fresh random salt
///
/// The result is a PHC string (`$argon2id$v=19$...`).
pub fn hash_password(raw: &str) -> Result<String, HashError> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)?;

    Ok(Argon2::default()
        .hash_password(raw.as_bytes(), &salt)?
        .to_string())
}

/// Checks a raw password against a PHC string produced by [`hash_password`]
///
/// Anything that does not parse as a PHC string never verifies.
pub fn verify_password(raw: &str, encoded: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(encoded) else {
        return false;
    };

    Argon2::default()
        .verify_password(raw.as_bytes(), &parsed)
        .is_ok()
}

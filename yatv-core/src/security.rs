//! Password hashing for user registration.
//!
//! Passwords are stored as salted Argon2id hashes in PHC string format. The
//! hash embeds its own parameters, so verification works for any work factor
//! a hash was created with.

use crate::{Result, config::HashingConfig, error::YatvError};
use argon2::{Algorithm, Argon2, Params, Version};
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::RngCore;

/// Salt size: 128 bits (16 bytes)
const SALT_SIZE: usize = 16;

/// Parallelism used for registration hashes
const HASH_PARALLELISM: u32 = 1;

/// Hashes a password with a fresh random salt.
///
/// # Returns
/// PHC-formatted hash string suitable for the `User.Password` column
///
/// # Errors
/// Returns error if the configured parameters are rejected by Argon2
///
/// # Example
/// ```rust
/// use yatv_core::config::HashingConfig;
/// use yatv_core::security::{hash_password, verify_password};
///
/// let config = HashingConfig { work_factor: 1, ..HashingConfig::default() };
/// let hash = hash_password("pw", &config)?;
/// assert_ne!(hash, "pw");
/// assert!(verify_password("pw", &hash)?);
/// # Ok::<(), yatv_core::YatvError>(())
/// ```
pub fn hash_password(password: &str, config: &HashingConfig) -> Result<String> {
    let params = Params::new(
        config.memory_kib,
        config.work_factor,
        HASH_PARALLELISM,
        None,
    )
    .map_err(|e| YatvError::hashing(format!("invalid Argon2 parameters: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut salt = [0u8; SALT_SIZE];
    rand::rng().fill_bytes(&mut salt);
    let salt_string =
        SaltString::encode_b64(&salt).map_err(|e| YatvError::hashing(format!("salt: {e}")))?;

    let hash = argon2
        .hash_password(password.as_bytes(), &salt_string)
        .map_err(YatvError::hashing)?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC hash string.
///
/// # Errors
/// Returns error if the stored hash is not a valid PHC string
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| YatvError::hashing(format!("stored hash is malformed: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fast_config() -> HashingConfig {
        HashingConfig {
            work_factor: 1,
            memory_kib: 1024,
        }
    }

    #[test]
    fn test_hash_verifies_and_differs_from_password() {
        let hash = hash_password("pw", &fast_config()).unwrap();

        assert_ne!(hash, "pw");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("pw", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("pw", &fast_config()).unwrap();
        let second = hash_password("pw", &fast_config()).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_work_factor_embedded_in_hash() {
        let hash = hash_password("pw", &HashingConfig::default()).unwrap();

        assert!(hash.contains("t=9"), "hash should carry t=9: {hash}");
        assert!(verify_password("pw", &hash).unwrap());
    }

    #[test]
    fn test_zero_work_factor_rejected() {
        let config = HashingConfig {
            work_factor: 0,
            ..fast_config()
        };
        assert!(matches!(
            hash_password("pw", &config),
            Err(YatvError::Hashing { .. })
        ));
    }

    #[test]
    fn test_malformed_stored_hash() {
        assert!(verify_password("pw", "plaintext").is_err());
    }
}

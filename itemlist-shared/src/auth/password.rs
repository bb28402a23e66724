/// Password hashing and credential checks
///
/// Registration stores an Argon2id hash of the password; login verifies the
/// submitted password against it. The plaintext never reaches the store or
/// the logs.
///
/// # Parameters
///
/// - **Algorithm**: Argon2id, version 0x13
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Salt**: 16 random bytes per hash
///
/// Parameters are embedded in the PHC string, so verification keeps working
/// for hashes written with older settings.
///
/// # Example
///
/// ```
/// use itemlist_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("pw123")?;
///
/// assert!(verify_password("pw123", &hash)?);
/// assert!(!verify_password("wrong", &hash)?);
/// # Ok(())
/// # }
/// ```

use crate::models::user::User;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};
use std::sync::OnceLock;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Stored hash is not a valid PHC string
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

fn argon2() -> Result<Argon2<'static>, PasswordError> {
    let params = ParamsBuilder::new()
        .m_cost(65536)
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    Ok(Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password into a PHC string (`$argon2id$v=19$m=65536,t=3,p=4$...`)
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored PHC hash
///
/// Returns `Ok(false)` for a wrong password; errors are reserved for hashes
/// that cannot be parsed or verified at all.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    if parsed_hash.hash.is_none() {
        return Err(PasswordError::InvalidHash("Hash has no output part".into()));
    }

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}

/// Hash verified when the username does not exist
fn placeholder_hash() -> Result<&'static str, PasswordError> {
    static PLACEHOLDER: OnceLock<String> = OnceLock::new();

    if let Some(hash) = PLACEHOLDER.get() {
        return Ok(hash.as_str());
    }
    let hash = hash_password("itemlist-placeholder-password")?;
    Ok(PLACEHOLDER.get_or_init(|| hash).as_str())
}

/// Checks login credentials for a looked-up user
///
/// `user` is None when the username is unknown. In that case a placeholder
/// hash is still verified, so both failure paths cost one Argon2 run and
/// return the same `false`.
pub fn check_credentials(user: Option<&User>, password: &str) -> Result<bool, PasswordError> {
    match user {
        Some(user) => verify_password(password, &user.password_hash),
        None => {
            verify_password(password, placeholder_hash()?)?;
            Ok(false)
        }
    }
}

/// Authentication primitives for the item list app
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and credential checks
/// - [`session`]: Session token generation and hashing
///
/// # Example
///
/// ```no_run
/// use itemlist_shared::auth::password::{hash_password, verify_password};
/// use itemlist_shared::auth::session::generate_session_token;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let (cookie_token, stored_hash) = generate_session_token();
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod session;

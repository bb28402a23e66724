/// Session token generation and hashing
///
/// The cookie carries a random 256-bit token, hex encoded. The `sessions`
/// table stores only its SHA-256, so request handling hashes the presented
/// cookie and looks the hash up.
///
/// # Example
///
/// ```
/// use itemlist_shared::auth::session::{generate_session_token, hash_session_token};
///
/// let (token, hash) = generate_session_token();
/// assert_eq!(token.len(), 64);
/// assert_eq!(hash, hash_session_token(&token));
/// ```

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Random bytes per token
const TOKEN_BYTES: usize = 32;

/// Length of an encoded token (hex)
pub const SESSION_TOKEN_LENGTH: usize = TOKEN_BYTES * 2;

/// Generates a new session token
///
/// Returns `(plaintext_token, sha256_hex)`. The plaintext goes into the
/// cookie, the hash into the database.
pub fn generate_session_token() -> (String, String) {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);

    let token = hex::encode(bytes);
    let hash = hash_session_token(&token);
    (token, hash)
}

/// Hashes a session token using SHA-256 (hex, 64 characters)
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Checks that a cookie value looks like a token we issued
///
/// Lets the server skip the database for obviously forged cookies.
pub fn is_well_formed_token(token: &str) -> bool {
    token.len() == SESSION_TOKEN_LENGTH && token.bytes().all(|b| b.is_ascii_hexdigit())
}

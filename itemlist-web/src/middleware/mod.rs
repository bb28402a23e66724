/// HTTP middleware
///
/// - `auth`: Session-cookie login guard
/// - `security`: Security response headers

pub mod auth;
pub mod security;

/// Page and form handlers
///
/// - `auth`: Register, login, logout
/// - `items`: Per-user item list and writes

pub mod auth;
pub mod items;

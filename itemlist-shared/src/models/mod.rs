/// Database models for the item list servers
///
/// # Models
///
/// - `item`: Items, optionally owned by a user
/// - `user`: Registered accounts (authenticated app)
/// - `session`: Login sessions keyed by token hash (authenticated app)

pub mod item;
pub mod session;
pub mod user;

/// API route handlers
///
/// - `health`: Health check endpoint
/// - `items`: List and create items
/// - `stats`: Item counters
/// - `pages`: Rendered landing page

pub mod health;
pub mod items;
pub mod pages;
pub mod stats;

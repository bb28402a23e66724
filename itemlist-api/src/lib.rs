//! # Item List API Server Library
//!
//! Public JSON API over the shared item store.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers
//! - `templates`: Embedded landing page

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod templates;

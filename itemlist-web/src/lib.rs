//! # Item List Web App Library
//!
//! Server-rendered, per-user item lists behind a username/password login.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error page rendering
//! - `flash`: One-shot flash messages
//! - `middleware`: Login guard and security headers
//! - `routes`: Page and form handlers
//! - `session`: Session cookie and redirect helpers
//! - `templates`: Embedded page templates

pub mod app;
pub mod config;
pub mod error;
pub mod flash;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod templates;

//! # Itemlist Shared Library
//!
//! Types, persistence and business logic used by both item list servers:
//! the public JSON API (`itemlist-api`) and the authenticated HTML app
//! (`itemlist-web`).
//!
//! ## Module Organization
//!
//! - `db`: SQLite pool and embedded migrations
//! - `models`: Database models and their queries
//! - `items`: Item validation and transactional writes
//! - `auth`: Password hashing and session tokens

pub mod auth;
pub mod db;
pub mod items;
pub mod models;


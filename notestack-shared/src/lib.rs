//! # NoteStack Shared Library
//!
//! This crate contains the types, database layer, and business logic shared
//! by the NoteStack API server and its auxiliary binaries.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Password hashing, JWT tokens, and the authorization guard
//! - `db`: Connection pool lifecycle and migrations
//! - `slug`: Tenant slug generation
//! - `plan`: Free/Pro plan enforcement

pub mod auth;
pub mod db;
pub mod models;
pub mod plan;
pub mod slug;

/// Current version of the NoteStack shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

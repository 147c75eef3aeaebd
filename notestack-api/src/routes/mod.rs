/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check and service root
/// - `auth`: Authentication endpoints (signup, login)
/// - `notes`: Tenant-scoped note CRUD
/// - `tenants`: Plan upgrade

pub mod auth;
pub mod health;
pub mod notes;
pub mod tenants;

//! Business logic services.
//!
//! - `auth` - Admin login, registration and bearer tokens
pub mod auth;

//! Project Germany Core - Shared domain types.
//!
//! Types shared by the Project Germany components:
//! - `server` - Public landing page, enquiry intake and the admin API
//! - `cli` - Migrations, admin maintenance and seed data
//!
//! # Architecture
//!
//! The core crate contains only types and parsing rules. No I/O, no database
//! access, no HTTP. Database encodings live behind the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, emails, enquiry status and interest categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

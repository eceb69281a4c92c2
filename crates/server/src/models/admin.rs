//! Admin account types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use project_germany_core::{AdminId, Email};

/// An admin account as stored, minus the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub id: AdminId,
    pub username: String,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}

/// The admin identity returned to the dashboard.
///
/// Also stored in request extensions by the auth extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: AdminId,
    pub username: String,
    pub email: Email,
}

impl From<Admin> for CurrentAdmin {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            email: admin.email,
        }
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

/// Successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: CurrentAdmin,
}

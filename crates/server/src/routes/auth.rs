//! Admin login, registration and token verification.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::extract::ApiJson;
use crate::middleware::RequireAdmin;
use crate::models::{CurrentAdmin, LoginRequest, LoginResponse, RegisterRequest};
use crate::services::auth::AuthError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub admin: CurrentAdmin,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub admin: CurrentAdmin,
}

/// Exchange a username and password for a bearer token.
///
/// POST /api/auth/login
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (token, admin) = state
        .auth()
        .login(body.username.as_deref(), body.password.as_deref())
        .await?;

    Ok(Json(LoginResponse {
        token,
        admin: admin.into(),
    }))
}

/// Create an admin account.
///
/// POST /api/auth/register
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    if !state.config().allow_registration {
        return Err(AppError::Auth(AuthError::RegistrationDisabled));
    }

    let admin = state
        .auth()
        .register(
            body.username.as_deref(),
            body.password.as_deref(),
            body.email.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Admin created successfully",
            admin: admin.into(),
        }),
    ))
}

/// Report who a token belongs to.
///
/// GET /api/auth/verify
pub async fn verify(RequireAdmin(admin): RequireAdmin) -> Json<VerifyResponse> {
    Json(VerifyResponse { admin })
}

//! Bearer token authentication for admin routes.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::{AppError, set_sentry_user};
use crate::models::CurrentAdmin;
use crate::services::auth::AuthError;
use crate::state::AppState;

/// Extractor that requires a valid admin bearer token.
///
/// Reads `Authorization: Bearer <token>`, verifies it and re-fetches the admin
/// so removed accounts lose access even before their token expires.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub CurrentAdmin);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthError::MissingToken)?;

        let admin = state
            .auth()
            .authenticate(token)
            .await
            .inspect_err(|e| tracing::debug!(error = %e, "Rejected admin token"))?;

        set_sentry_user(&admin.id, &admin.username);
        tracing::Span::current().record("admin_id", admin.id.as_i32());

        Ok(Self(admin.into()))
    }
}

/// The token from an `Authorization: Bearer` header, if present and non-empty.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/enquiries");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(
            bearer_token(&parts_with(Some("Bearer abc.def.ghi"))),
            Some("abc.def.ghi")
        );
        assert_eq!(bearer_token(&parts_with(Some("bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&parts_with(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts_with(Some("Basic dXNlcjpwdw=="))), None);
        assert_eq!(bearer_token(&parts_with(Some("abc.def.ghi"))), None);
        assert_eq!(bearer_token(&parts_with(None)), None);
    }
}

//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                       - Landing page
//! GET    /admin/login            - Dashboard login page
//! GET    /admin                  - Dashboard
//! GET    /health                 - Liveness
//! GET    /health/ready           - Readiness (store ping)
//!
//! # Enquiries API
//! POST   /api/enquiries          - Submit an enquiry (public)
//! GET    /api/enquiries          - List, filter and sort (admin)
//! GET    /api/enquiries/stats    - Dashboard counts (admin)
//! GET    /api/enquiries/{id}     - One enquiry (admin)
//! PUT    /api/enquiries/{id}     - Partial update (admin)
//! POST   /api/enquiries/{id}     - Partial update (admin)
//! DELETE /api/enquiries/{id}     - Delete (admin)
//!
//! # Auth API
//! POST   /api/auth/login         - Username/password login, returns a token
//! POST   /api/auth/register      - Create an admin (when enabled)
//! GET    /api/auth/verify        - Resolve the bearer token (admin)
//! ```

pub mod admin;
pub mod auth;
pub mod enquiries;
pub mod health;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the enquiry API router.
pub fn enquiry_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(enquiries::submit).get(enquiries::list))
        .route("/stats", get(enquiries::stats))
        .route(
            "/{id}",
            get(enquiries::show)
                .put(enquiries::update)
                .post(enquiries::update)
                .delete(enquiries::delete),
        )
}

/// Create the auth API router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/verify", get(auth::verify))
}

/// Create the dashboard page router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/login", get(admin::login_page))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/admin", admin_routes())
        .nest("/api/enquiries", enquiry_routes())
        .nest("/api/auth", auth_routes())
}

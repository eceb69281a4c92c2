//! Admin dashboard pages.
//!
//! Both pages are static shells; `static/js/admin.js` logs in against the
//! JSON API and keeps the bearer token in `sessionStorage`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use project_germany_core::{EnquiryStatus, Interest};

use crate::filters;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    /// Show the "create account" form.
    pub allow_registration: bool,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub statuses: &'static [EnquiryStatus],
    pub interests: &'static [Interest],
}

/// GET /admin/login
pub async fn login_page(State(state): State<AppState>) -> impl IntoResponse {
    LoginTemplate {
        allow_registration: state.config().allow_registration,
    }
}

/// GET /admin
pub async fn dashboard() -> impl IntoResponse {
    DashboardTemplate {
        statuses: &EnquiryStatus::ALL,
        interests: &Interest::ALL,
    }
}

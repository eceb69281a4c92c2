//! Enquiry API: public submission and admin management.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::extract::{ApiJson, ApiQuery, EnquiryPath, enquiry_not_found};
use crate::middleware::RequireAdmin;
use crate::models::{
    Enquiry, EnquiryFilter, EnquiryPatch, EnquiryStats, EnquirySubmission, EnquiryUpdate,
    ListQuery, NewEnquiry,
};
use crate::state::AppState;

/// Window counted as "recent" on the dashboard.
const RECENT_WINDOW_DAYS: i64 = 7;

/// Confirmation body for a deletion.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}

/// Store a landing page submission.
///
/// POST /api/enquiries
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<EnquirySubmission>,
) -> Result<(StatusCode, Json<Enquiry>)> {
    let enquiry = NewEnquiry::try_from(form)?;
    let enquiry = state.enquiries().create(enquiry).await?;

    tracing::info!(
        enquiry_id = %enquiry.id,
        interest = %enquiry.interest,
        "Enquiry received"
    );

    Ok((StatusCode::CREATED, Json(enquiry)))
}

/// List enquiries, optionally filtered and sorted.
///
/// GET /api/enquiries?status=&interest=&sortBy=&order=
#[instrument(skip_all)]
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Vec<Enquiry>>> {
    let filter = EnquiryFilter::try_from(query)?;
    let enquiries = state.enquiries().list(&filter).await?;
    Ok(Json(enquiries))
}

/// Dashboard counts.
///
/// GET /api/enquiries/stats
#[instrument(skip_all)]
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<EnquiryStats>> {
    let since = Utc::now() - Duration::days(RECENT_WINDOW_DAYS);
    let stats = state.enquiries().stats(since).await?;
    Ok(Json(stats))
}

/// GET /api/enquiries/{id}
#[instrument(skip_all, fields(enquiry_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    EnquiryPath(id): EnquiryPath,
) -> Result<Json<Enquiry>> {
    let enquiry = state
        .enquiries()
        .get(id)
        .await?
        .ok_or_else(enquiry_not_found)?;
    Ok(Json(enquiry))
}

/// Overwrite the supplied fields of an enquiry.
///
/// PUT|POST /api/enquiries/{id}
#[instrument(skip_all, fields(enquiry_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    EnquiryPath(id): EnquiryPath,
    ApiJson(update): ApiJson<EnquiryUpdate>,
) -> Result<Json<Enquiry>> {
    let patch = EnquiryPatch::try_from(update)?;
    let enquiry = state
        .enquiries()
        .update(id, &patch)
        .await?
        .ok_or_else(enquiry_not_found)?;

    tracing::info!(
        admin_id = %admin.id,
        status = %enquiry.status,
        "Enquiry updated"
    );

    Ok(Json(enquiry))
}

/// DELETE /api/enquiries/{id}
#[instrument(skip_all, fields(enquiry_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    EnquiryPath(id): EnquiryPath,
) -> Result<Json<DeletedResponse>> {
    if !state.enquiries().delete(id).await? {
        return Err(enquiry_not_found());
    }

    tracing::info!(admin_id = %admin.id, "Enquiry deleted");

    Ok(Json(DeletedResponse {
        message: "Enquiry deleted successfully",
    }))
}

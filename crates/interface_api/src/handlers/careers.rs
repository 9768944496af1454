//! Career application handlers

use axum::{extract::State, http::StatusCode, Extension, Json};

use domain_leads::{CareerApplication, CareerForm, SubmissionStore};

use crate::auth::{permissions, require_role, Claims};
use crate::dto::CreatedResponse;
use crate::extract::FormJson;
use crate::{error::ApiError, AppState};

/// Accepts a job application (`/api/karriere`)
pub async fn apply(
    State(state): State<AppState>,
    FormJson(form): FormJson<CareerForm>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let application = state.intake.submit_career(form).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::career(*application.id.as_uuid())),
    ))
}

pub async fn list_applications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<CareerApplication>>, ApiError> {
    require_role(&claims, permissions::LEADS_READ)?;
    let applications = state
        .intake
        .store()
        .list_career_applications()
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(applications))
}

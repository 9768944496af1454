//! Partner registration handlers

use axum::{extract::State, http::StatusCode, Extension, Json};

use domain_leads::{PartnerForm, PartnerRegistration, SubmissionStore};

use crate::auth::{permissions, require_role, Claims};
use crate::dto::CreatedResponse;
use crate::extract::FormJson;
use crate::{error::ApiError, AppState};

/// Registers a trade partner (`/api/partner`)
pub async fn register_partner(
    State(state): State<AppState>,
    FormJson(form): FormJson<PartnerForm>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let registration = state.intake.submit_partner(form).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::partner(*registration.id.as_uuid())),
    ))
}

pub async fn list_registrations(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<PartnerRegistration>>, ApiError> {
    require_role(&claims, permissions::LEADS_READ)?;
    let registrations = state
        .intake
        .store()
        .list_partner_registrations()
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(registrations))
}

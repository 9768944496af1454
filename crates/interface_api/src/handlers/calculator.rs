//! Calculator handlers

use axum::{extract::State, Extension, Json};

use domain_leads::{CalculatorForm, CalculatorSubmission, SubmissionStore};

use crate::auth::{permissions, require_role, Claims};
use crate::dto::SavedResponse;
use crate::error::{ApiError, SAVE_FAILED};
use crate::extract::FormJson;
use crate::AppState;

/// Stores calculator results (`/api/calculator/send-results`)
pub async fn send_results(
    State(state): State<AppState>,
    FormJson(form): FormJson<CalculatorForm>,
) -> Result<Json<SavedResponse>, ApiError> {
    state
        .intake
        .submit_calculator(form)
        .await
        .map_err(|e| ApiError::from(e).with_public_message(SAVE_FAILED))?;
    Ok(Json(SavedResponse::calculator()))
}

pub async fn list_submissions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<CalculatorSubmission>>, ApiError> {
    require_role(&claims, permissions::LEADS_READ)?;
    let submissions = state
        .intake
        .store()
        .list_calculator_submissions()
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(submissions))
}

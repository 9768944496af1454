//! Booking handlers

use axum::{extract::State, http::StatusCode, Extension, Json};

use domain_leads::{BookingForm, BookingRequest, SubmissionStore};

use crate::auth::{permissions, require_role, Claims};
use crate::dto::BookingCreatedResponse;
use crate::extract::FormJson;
use crate::{error::ApiError, AppState};

/// Accepts a consultation request (`/api/anfrage`, `/api/booking`)
pub async fn create_booking(
    State(state): State<AppState>,
    FormJson(form): FormJson<BookingForm>,
) -> Result<(StatusCode, Json<BookingCreatedResponse>), ApiError> {
    let booking = state.intake.submit_booking(form).await?;
    Ok((
        StatusCode::CREATED,
        Json(BookingCreatedResponse::new(*booking.id.as_uuid())),
    ))
}

/// Lists booking requests, newest first
pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<BookingRequest>>, ApiError> {
    require_role(&claims, permissions::LEADS_READ)?;
    let bookings = state
        .intake
        .store()
        .list_bookings()
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(bookings))
}

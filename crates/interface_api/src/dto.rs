//! Response bodies for the form endpoints
//!
//! Field names are part of the public contract with the website frontend and
//! stay snake_case.

use serde::Serialize;
use uuid::Uuid;

/// `201` body for `/api/anfrage` and `/api/booking`
#[derive(Debug, Serialize)]
pub struct BookingCreatedResponse {
    pub success: bool,
    pub message: &'static str,
    pub booking_id: Uuid,
    pub id: Uuid,
}

impl BookingCreatedResponse {
    pub fn new(id: Uuid) -> Self {
        Self {
            success: true,
            message: "Anfrage erfolgreich gesendet",
            booking_id: id,
            id,
        }
    }
}

/// `201` body for partner and career submissions
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub message: &'static str,
    pub id: Uuid,
}

impl CreatedResponse {
    pub fn partner(id: Uuid) -> Self {
        Self {
            success: true,
            message: "Registrierung erfolgreich gesendet",
            id,
        }
    }

    pub fn career(id: Uuid) -> Self {
        Self {
            success: true,
            message: "Bewerbung erfolgreich gesendet",
            id,
        }
    }
}

/// `200` body for `/api/calculator/send-results`
#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub success: bool,
    pub message: &'static str,
}

impl SavedResponse {
    pub fn calculator() -> Self {
        Self {
            success: true,
            message: "Ergebnisse gespeichert",
        }
    }
}

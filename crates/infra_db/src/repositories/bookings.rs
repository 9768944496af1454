//! Booking request repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::BookingId;
use domain_leads::BookingRequest;

use crate::error::DatabaseError;

/// Repository for the `booking_requests` table
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Creates a new BookingRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a booking request and returns the stored row
    pub async fn insert(&self, booking: &BookingRequest) -> Result<BookingRow, DatabaseError> {
        sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO booking_requests (
                id, name, email, phone, service, message,
                consent_given, consent_timestamp, marketing_consent, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING
                id, name, email, phone, service, message,
                consent_given, consent_timestamp, marketing_consent, created_at
            "#,
        )
        .bind(booking.id.as_uuid())
        .bind(&booking.name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(&booking.service)
        .bind(&booking.message)
        .bind(booking.consent_given)
        .bind(booking.consent_timestamp)
        .bind(booking.marketing_consent)
        .bind(booking.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::classify)
    }

    /// Lists all booking requests, newest first
    pub async fn list(&self) -> Result<Vec<BookingRow>, DatabaseError> {
        sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT
                id, name, email, phone, service, message,
                consent_given, consent_timestamp, marketing_consent, created_at
            FROM booking_requests
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::classify)
    }
}

/// Database row for a booking request
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: String,
    pub message: Option<String>,
    pub consent_given: bool,
    pub consent_timestamp: Option<DateTime<Utc>>,
    pub marketing_consent: bool,
    pub created_at: DateTime<Utc>,
}

impl From<BookingRow> for BookingRequest {
    fn from(row: BookingRow) -> Self {
        BookingRequest {
            id: BookingId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            service: row.service,
            message: row.message,
            consent_given: row.consent_given,
            consent_timestamp: row.consent_timestamp,
            marketing_consent: row.marketing_consent,
            created_at: row.created_at,
        }
    }
}

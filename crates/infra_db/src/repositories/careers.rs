//! Career application repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::CareerApplicationId;
use domain_leads::CareerApplication;

use crate::error::DatabaseError;

/// Repository for the `career_applications` table
#[derive(Debug, Clone)]
pub struct CareerRepository {
    pool: PgPool,
}

impl CareerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a career application and returns the stored row
    pub async fn insert(
        &self,
        application: &CareerApplication,
    ) -> Result<CareerApplicationRow, DatabaseError> {
        sqlx::query_as::<_, CareerApplicationRow>(
            r#"
            INSERT INTO career_applications (
                id, name, email, phone, position, experience, motivation, resume_url,
                consent_given, consent_timestamp, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING
                id, name, email, phone, position, experience, motivation, resume_url,
                consent_given, consent_timestamp, status, created_at
            "#,
        )
        .bind(application.id.as_uuid())
        .bind(&application.name)
        .bind(&application.email)
        .bind(&application.phone)
        .bind(&application.position)
        .bind(&application.experience)
        .bind(&application.motivation)
        .bind(&application.resume_url)
        .bind(application.consent_given)
        .bind(application.consent_timestamp)
        .bind(&application.status)
        .bind(application.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::classify)
    }

    /// Lists all career applications, newest first
    pub async fn list(&self) -> Result<Vec<CareerApplicationRow>, DatabaseError> {
        sqlx::query_as::<_, CareerApplicationRow>(
            r#"
            SELECT
                id, name, email, phone, position, experience, motivation, resume_url,
                consent_given, consent_timestamp, status, created_at
            FROM career_applications
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::classify)
    }
}

/// Database row for a career application
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CareerApplicationRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub experience: Option<String>,
    pub motivation: Option<String>,
    pub resume_url: Option<String>,
    pub consent_given: bool,
    pub consent_timestamp: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<CareerApplicationRow> for CareerApplication {
    fn from(row: CareerApplicationRow) -> Self {
        CareerApplication {
            id: CareerApplicationId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            position: row.position,
            experience: row.experience,
            motivation: row.motivation,
            resume_url: row.resume_url,
            consent_given: row.consent_given,
            consent_timestamp: row.consent_timestamp,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

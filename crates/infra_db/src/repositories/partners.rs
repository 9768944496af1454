//! Partner registration repository
//!
//! Trades are stored as a native `TEXT[]` column.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::PartnerRegistrationId;
use domain_leads::PartnerRegistration;

use crate::error::DatabaseError;

/// Repository for the `partner_registrations` table
#[derive(Debug, Clone)]
pub struct PartnerRepository {
    pool: PgPool,
}

impl PartnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a partner registration and returns the stored row
    ///
    /// The status is written explicitly so the record and the row agree even
    /// if the column default changes.
    pub async fn insert(
        &self,
        registration: &PartnerRegistration,
    ) -> Result<PartnerRegistrationRow, DatabaseError> {
        sqlx::query_as::<_, PartnerRegistrationRow>(
            r#"
            INSERT INTO partner_registrations (
                id, company_name, contact_person, email, phone, address, website,
                trades, employees, experience, motivation, certifications,
                consent_given, consent_timestamp, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING
                id, company_name, contact_person, email, phone, address, website,
                trades, employees, experience, motivation, certifications,
                consent_given, consent_timestamp, status, created_at
            "#,
        )
        .bind(registration.id.as_uuid())
        .bind(&registration.company_name)
        .bind(&registration.contact_person)
        .bind(&registration.email)
        .bind(&registration.phone)
        .bind(&registration.address)
        .bind(&registration.website)
        .bind(&registration.trades)
        .bind(&registration.employees)
        .bind(&registration.experience)
        .bind(&registration.motivation)
        .bind(&registration.certifications)
        .bind(registration.consent_given)
        .bind(registration.consent_timestamp)
        .bind(&registration.status)
        .bind(registration.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::classify)
    }

    /// Lists all partner registrations, newest first
    pub async fn list(&self) -> Result<Vec<PartnerRegistrationRow>, DatabaseError> {
        sqlx::query_as::<_, PartnerRegistrationRow>(
            r#"
            SELECT
                id, company_name, contact_person, email, phone, address, website,
                trades, employees, experience, motivation, certifications,
                consent_given, consent_timestamp, status, created_at
            FROM partner_registrations
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::classify)
    }
}

/// Database row for a partner registration
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PartnerRegistrationRow {
    pub id: Uuid,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: Option<String>,
    pub trades: Vec<String>,
    pub employees: String,
    pub experience: String,
    pub motivation: String,
    pub certifications: Option<String>,
    pub consent_given: bool,
    pub consent_timestamp: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<PartnerRegistrationRow> for PartnerRegistration {
    fn from(row: PartnerRegistrationRow) -> Self {
        PartnerRegistration {
            id: PartnerRegistrationId::from_uuid(row.id),
            company_name: row.company_name,
            contact_person: row.contact_person,
            email: row.email,
            phone: row.phone,
            address: row.address,
            website: row.website,
            trades: row.trades,
            employees: row.employees,
            experience: row.experience,
            motivation: row.motivation,
            certifications: row.certifications,
            consent_given: row.consent_given,
            consent_timestamp: row.consent_timestamp,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

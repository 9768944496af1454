//! Calculator submission repository
//!
//! `inputs` and `results` are stored as JSON text, unchanged from what the
//! domain serialized.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::CalculatorSubmissionId;
use domain_leads::CalculatorSubmission;

use crate::error::DatabaseError;

/// Repository for the `calculator_submissions` table
#[derive(Debug, Clone)]
pub struct CalculatorRepository {
    pool: PgPool,
}

impl CalculatorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a calculator submission and returns the stored row
    pub async fn insert(
        &self,
        submission: &CalculatorSubmission,
    ) -> Result<CalculatorSubmissionRow, DatabaseError> {
        sqlx::query_as::<_, CalculatorSubmissionRow>(
            r#"
            INSERT INTO calculator_submissions (
                id, email, name, calculator_type, inputs, results,
                consent_given, consent_timestamp, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING
                id, email, name, calculator_type, inputs, results,
                consent_given, consent_timestamp, created_at
            "#,
        )
        .bind(submission.id.as_uuid())
        .bind(&submission.email)
        .bind(&submission.name)
        .bind(&submission.calculator_type)
        .bind(&submission.inputs)
        .bind(&submission.results)
        .bind(submission.consent_given)
        .bind(submission.consent_timestamp)
        .bind(submission.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::classify)
    }

    /// Lists all calculator submissions, newest first
    pub async fn list(&self) -> Result<Vec<CalculatorSubmissionRow>, DatabaseError> {
        sqlx::query_as::<_, CalculatorSubmissionRow>(
            r#"
            SELECT
                id, email, name, calculator_type, inputs, results,
                consent_given, consent_timestamp, created_at
            FROM calculator_submissions
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::classify)
    }
}

/// Database row for a calculator submission
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CalculatorSubmissionRow {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub calculator_type: String,
    pub inputs: String,
    pub results: String,
    pub consent_given: bool,
    pub consent_timestamp: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<CalculatorSubmissionRow> for CalculatorSubmission {
    fn from(row: CalculatorSubmissionRow) -> Self {
        CalculatorSubmission {
            id: CalculatorSubmissionId::from_uuid(row.id),
            email: row.email,
            name: row.name,
            calculator_type: row.calculator_type,
            inputs: row.inputs,
            results: row.results,
            consent_given: row.consent_given,
            consent_timestamp: row.consent_timestamp,
            created_at: row.created_at,
        }
    }
}

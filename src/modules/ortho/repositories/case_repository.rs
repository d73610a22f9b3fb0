use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::ortho::models::{CaseStatus, OrthoCase};

/// Repository for orthodontic case database operations
pub struct CaseRepository {
    pool: PgPool,
}

impl CaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<OrthoCase>> {
        let row = sqlx::query_as::<_, OrthoCaseRow>(
            r#"
            SELECT
                id, clinic_id, patient_id, total_amount, down_payment,
                monthly_amount, due_day, total_months, start_date, status,
                created_at, updated_at
            FROM ortho_cases
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch ortho case: {}", e)))?;

        match row {
            Some(r) => Ok(Some(r.try_into()?)),
            None => Ok(None),
        }
    }

    /// Active cases for a clinic, in creation order (bulk adjustment scope)
    pub async fn find_active_by_clinic(&self, clinic_id: Uuid) -> Result<Vec<OrthoCase>> {
        let rows = sqlx::query_as::<_, OrthoCaseRow>(
            r#"
            SELECT
                id, clinic_id, patient_id, total_amount, down_payment,
                monthly_amount, due_day, total_months, start_date, status,
                created_at, updated_at
            FROM ortho_cases
            WHERE clinic_id = $1 AND status = 'ativo'
            ORDER BY created_at ASC
            "#,
        )
        .bind(clinic_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch ortho cases: {}", e)))?;

        rows.into_iter().map(|row| row.try_into()).collect()
    }
}

/// Database row representation for the ortho_cases table
#[derive(sqlx::FromRow)]
struct OrthoCaseRow {
    id: Uuid,
    clinic_id: Uuid,
    patient_id: Uuid,
    total_amount: Decimal,
    down_payment: Decimal,
    monthly_amount: Option<Decimal>,
    due_day: Option<i32>,
    total_months: Option<i32>,
    start_date: NaiveDate,
    status: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl TryFrom<OrthoCaseRow> for OrthoCase {
    type Error = AppError;

    fn try_from(row: OrthoCaseRow) -> Result<Self> {
        let status = CaseStatus::try_from(row.status).map_err(AppError::Internal)?;

        Ok(OrthoCase {
            id: row.id,
            clinic_id: row.clinic_id,
            patient_id: row.patient_id,
            total_amount: row.total_amount,
            down_payment: row.down_payment,
            monthly_amount: row.monthly_amount,
            due_day: row.due_day,
            total_months: row.total_months,
            start_date: row.start_date,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

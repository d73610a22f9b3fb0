// Store access for receivable titles.
//
// Schedule creation is write-once per case: the existence check and batch
// insert run in one transaction holding a per-case advisory lock, and the
// unique index on (ortho_case_id, installment_number) backstops concurrent
// duplicates.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::ortho::models::{ReceivableTitle, TitleStatus};

/// Repository for receivable-title database operations
pub struct TitleRepository {
    pool: PgPool,
}

impl TitleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a freshly generated schedule for a case.
    ///
    /// # Errors
    /// `Conflict` when any title already references the case; nothing is
    /// written in that path.
    pub async fn create_schedule(
        &self,
        ortho_case_id: Uuid,
        titles: &[ReceivableTitle],
    ) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        // Serialize concurrent generation attempts for the same case
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))")
            .bind(ortho_case_id)
            .execute(tx.as_mut())
            .await
            .map_err(|e| AppError::Internal(format!("Failed to take case lock: {}", e)))?;

        let existing: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM receivable_titles WHERE ortho_case_id = $1",
        )
        .bind(ortho_case_id)
        .fetch_one(tx.as_mut())
        .await
        .map_err(|e| AppError::Internal(format!("Failed to count titles: {}", e)))?;

        if existing > 0 {
            return Err(AppError::conflict(
                "Installments already generated for this case",
            ));
        }

        for title in titles {
            self.insert_with_tx(&mut tx, title).await?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn insert_with_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        title: &ReceivableTitle,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO receivable_titles (
                id, ortho_case_id, clinic_id, amount, balance, due_date,
                status, installment_number, total_installments,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(title.id)
        .bind(title.ortho_case_id)
        .bind(title.clinic_id)
        .bind(title.amount)
        .bind(title.balance)
        .bind(title.due_date)
        .bind(title.status.to_string())
        .bind(title.installment_number)
        .bind(title.total_installments)
        .bind(title.created_at)
        .bind(title.updated_at)
        .execute(tx.as_mut())
        .await
        .map_err(|e| AppError::Internal(format!("Failed to insert title: {}", e)))?;

        Ok(())
    }

    /// All titles for a case, ordered by installment number
    pub async fn find_by_case(&self, ortho_case_id: Uuid) -> Result<Vec<ReceivableTitle>> {
        let rows = sqlx::query_as::<_, ReceivableTitleRow>(
            r#"
            SELECT
                id, ortho_case_id, clinic_id, amount, balance, due_date,
                status, installment_number, total_installments,
                created_at, updated_at
            FROM receivable_titles
            WHERE ortho_case_id = $1
            ORDER BY installment_number ASC
            "#,
        )
        .bind(ortho_case_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch titles: {}", e)))?;

        rows.into_iter().map(|row| row.try_into()).collect()
    }
}

/// Database row representation for the receivable_titles table
#[derive(sqlx::FromRow)]
struct ReceivableTitleRow {
    id: Uuid,
    ortho_case_id: Uuid,
    clinic_id: Uuid,
    amount: Decimal,
    balance: Decimal,
    due_date: NaiveDate,
    status: String,
    installment_number: i32,
    total_installments: i32,
    created_at: chrono::NaiveDateTime,
    updated_at: chrono::NaiveDateTime,
}

impl TryFrom<ReceivableTitleRow> for ReceivableTitle {
    type Error = AppError;

    fn try_from(row: ReceivableTitleRow) -> Result<Self> {
        let status = TitleStatus::try_from(row.status).map_err(AppError::Internal)?;

        Ok(ReceivableTitle {
            id: row.id,
            ortho_case_id: row.ortho_case_id,
            clinic_id: row.clinic_id,
            amount: row.amount,
            balance: row.balance,
            due_date: row.due_date,
            status,
            installment_number: row.installment_number,
            total_installments: row.total_installments,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// Write path for price adjustments.
//
// Each case's re-price runs in its own transaction: future open titles and
// the case's stored monthly amount change together or not at all. Audit rows
// are inserted outside that transaction, one per call (individual) or per
// batch (bulk).

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::ortho::models::AdjustmentLog;

/// Repository for the price-adjustment write path
pub struct AdjustmentRepository {
    pool: PgPool,
}

impl AdjustmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Re-price one case: set `amount = balance = new_amount` on every title
    /// with status != 'paid' and due_date >= today, and store the new
    /// monthly amount on the case. Returns the number of titles touched.
    pub async fn apply_case_adjustment(
        &self,
        ortho_case_id: Uuid,
        new_amount: Decimal,
        today: chrono::NaiveDate,
    ) -> Result<i64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        let titles_updated = sqlx::query(
            r#"
            UPDATE receivable_titles
            SET amount = $2,
                balance = $2,
                updated_at = NOW()
            WHERE ortho_case_id = $1
              AND status <> 'paid'
              AND due_date >= $3
            "#,
        )
        .bind(ortho_case_id)
        .bind(new_amount)
        .bind(today)
        .execute(tx.as_mut())
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update titles: {}", e)))?
        .rows_affected();

        sqlx::query(
            r#"
            UPDATE ortho_cases
            SET monthly_amount = $2,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(ortho_case_id)
        .bind(new_amount)
        .execute(tx.as_mut())
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update case amount: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        Ok(titles_updated as i64)
    }

    /// Persist one audit row
    pub async fn insert_log(&self, log: &AdjustmentLog) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO price_adjustment_logs (
                id, clinic_id, ortho_case_id, previous_amount, new_amount,
                percent_applied, fixed_applied, cases_updated, titles_updated,
                adjusted_by, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(log.id)
        .bind(log.clinic_id)
        .bind(log.ortho_case_id)
        .bind(log.previous_amount)
        .bind(log.new_amount)
        .bind(log.percent_applied)
        .bind(log.fixed_applied)
        .bind(log.cases_updated)
        .bind(log.titles_updated)
        .bind(log.adjusted_by)
        .bind(log.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to insert adjustment log: {}", e)))?;

        Ok(())
    }
}

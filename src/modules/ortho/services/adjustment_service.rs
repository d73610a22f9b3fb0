// Business logic for individual and bulk price adjustment.
//
// The new amount is either an explicit fixed value or the current stored
// amount raised by a percentage, rounded half-up to 2 decimals. Only future
// open titles change; paid and past-due titles are immutable history. Each
// case's re-price is transactional, but a bulk run is not atomic as a whole:
// a failure partway leaves earlier cases adjusted and later ones untouched.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::money::round_half_up;
use crate::core::{AppError, Result};
use crate::modules::ortho::models::AdjustmentLog;
use crate::modules::ortho::repositories::{AdjustmentRepository, CaseRepository};

/// Result of an adjustment call
#[derive(Debug, Clone)]
pub struct AdjustmentOutcome {
    pub cases_updated: i64,
    pub titles_updated: i64,
    /// Previous monthly amount (individual mode only)
    pub previous_amount: Option<Decimal>,
    /// New monthly amount (individual mode only)
    pub new_amount: Option<Decimal>,
}

/// Service for price-adjustment operations
pub struct AdjustmentService {
    case_repository: CaseRepository,
    adjustment_repository: AdjustmentRepository,
}

impl AdjustmentService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            case_repository: CaseRepository::new(pool.clone()),
            adjustment_repository: AdjustmentRepository::new(pool),
        }
    }

    /// New monthly amount for a case.
    ///
    /// An explicit fixed value wins over a percentage; the percentage is
    /// multiplicative on the current stored amount. Result rounds half-up
    /// to 2 decimals.
    pub fn compute_new_amount(
        current: Decimal,
        percent: Option<Decimal>,
        fixed: Option<Decimal>,
    ) -> Result<Decimal> {
        if let Some(fixed) = fixed {
            if fixed <= Decimal::ZERO {
                return Err(AppError::validation("valor_fixo_novo must be positive"));
            }
            return Ok(round_half_up(fixed));
        }

        let percent = percent.ok_or_else(|| {
            AppError::validation(
                "Either percentual_reajuste or valor_fixo_novo is required",
            )
        })?;

        let factor = Decimal::ONE + percent / Decimal::from(100);
        let adjusted = round_half_up(current * factor);

        if adjusted <= Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Adjustment of {}% on {} produces a non-positive amount",
                percent, current
            )));
        }

        Ok(adjusted)
    }

    /// Adjust one case and its future open titles.
    ///
    /// # Errors
    /// - `Validation` when neither percent nor fixed value is supplied, or
    ///   the case has no stored monthly amount
    /// - `NotFound` when the case does not exist
    pub async fn adjust_case(
        &self,
        ortho_case_id: Uuid,
        percent: Option<Decimal>,
        fixed: Option<Decimal>,
        adjusted_by: Uuid,
    ) -> Result<AdjustmentOutcome> {
        if percent.is_none() && fixed.is_none() {
            return Err(AppError::validation(
                "Either percentual_reajuste or valor_fixo_novo is required",
            ));
        }

        let case = self
            .case_repository
            .find_by_id(ortho_case_id)
            .await?
            .ok_or_else(|| AppError::not_found("Ortho case not found"))?;

        let current = case
            .monthly_amount
            .ok_or_else(|| AppError::validation("Case has no monthly amount configured"))?;

        let new_amount = Self::compute_new_amount(current, percent, fixed)?;
        let today = Utc::now().date_naive();

        let titles_updated = self
            .adjustment_repository
            .apply_case_adjustment(ortho_case_id, new_amount, today)
            .await?;

        let log = AdjustmentLog::individual(
            case.clinic_id,
            ortho_case_id,
            current,
            new_amount,
            percent,
            fixed,
            titles_updated,
            adjusted_by,
        );
        self.adjustment_repository.insert_log(&log).await?;

        info!(
            ortho_case_id = %ortho_case_id,
            previous_amount = %current,
            new_amount = %new_amount,
            titles_updated,
            "Case price adjusted"
        );

        Ok(AdjustmentOutcome {
            cases_updated: 1,
            titles_updated,
            previous_amount: Some(current),
            new_amount: Some(new_amount),
        })
    }

    /// Adjust every active case of a clinic, sequentially.
    ///
    /// Each case reads its latest persisted amount, so repeat runs compound
    /// only through what the store reflects. Cases without a stored monthly
    /// amount are skipped with a warning. Zero active cases is a success
    /// with zero counts. One audit row covers the whole batch.
    pub async fn adjust_clinic(
        &self,
        clinic_id: Uuid,
        percent: Option<Decimal>,
        fixed: Option<Decimal>,
        adjusted_by: Uuid,
    ) -> Result<AdjustmentOutcome> {
        if percent.is_none() && fixed.is_none() {
            return Err(AppError::validation(
                "Either percentual_reajuste or valor_fixo_novo is required",
            ));
        }

        let cases = self.case_repository.find_active_by_clinic(clinic_id).await?;
        let today = Utc::now().date_naive();

        let mut cases_updated = 0i64;
        let mut titles_updated = 0i64;

        for case in &cases {
            let current = match case.monthly_amount {
                Some(amount) => amount,
                None => {
                    warn!(
                        ortho_case_id = %case.id,
                        "Skipping case without monthly amount in bulk adjustment"
                    );
                    continue;
                }
            };

            let new_amount = Self::compute_new_amount(current, percent, fixed)?;
            let updated = self
                .adjustment_repository
                .apply_case_adjustment(case.id, new_amount, today)
                .await?;

            cases_updated += 1;
            titles_updated += updated;
        }

        let log = AdjustmentLog::bulk(
            clinic_id,
            percent,
            fixed,
            cases_updated,
            titles_updated,
            adjusted_by,
        );
        self.adjustment_repository.insert_log(&log).await?;

        info!(
            clinic_id = %clinic_id,
            cases_updated,
            titles_updated,
            "Bulk price adjustment completed"
        );

        Ok(AdjustmentOutcome {
            cases_updated,
            titles_updated,
            previous_amount: None,
            new_amount: None,
        })
    }
}

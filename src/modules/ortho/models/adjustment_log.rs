use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audit record for a price-adjustment call.
///
/// Individual adjustments record one row per case with old/new values; a
/// bulk run records a single row for the whole batch. `adjusted_by` carries
/// the authenticated caller's id threaded from the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentLog {
    pub id: Uuid,
    pub clinic_id: Uuid,
    /// Set for individual adjustments, NULL for bulk runs
    pub ortho_case_id: Option<Uuid>,
    pub previous_amount: Option<Decimal>,
    pub new_amount: Option<Decimal>,
    pub percent_applied: Option<Decimal>,
    pub fixed_applied: Option<Decimal>,
    pub cases_updated: i64,
    pub titles_updated: i64,
    pub adjusted_by: Uuid,
    pub created_at: NaiveDateTime,
}

impl AdjustmentLog {
    /// Audit row for a single-case adjustment
    #[allow(clippy::too_many_arguments)]
    pub fn individual(
        clinic_id: Uuid,
        ortho_case_id: Uuid,
        previous_amount: Decimal,
        new_amount: Decimal,
        percent_applied: Option<Decimal>,
        fixed_applied: Option<Decimal>,
        titles_updated: i64,
        adjusted_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            clinic_id,
            ortho_case_id: Some(ortho_case_id),
            previous_amount: Some(previous_amount),
            new_amount: Some(new_amount),
            percent_applied,
            fixed_applied,
            cases_updated: 1,
            titles_updated,
            adjusted_by,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Single audit row covering a whole bulk run
    pub fn bulk(
        clinic_id: Uuid,
        percent_applied: Option<Decimal>,
        fixed_applied: Option<Decimal>,
        cases_updated: i64,
        titles_updated: i64,
        adjusted_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            clinic_id,
            ortho_case_id: None,
            previous_amount: None,
            new_amount: None,
            percent_applied,
            fixed_applied,
            cases_updated,
            titles_updated,
            adjusted_by,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

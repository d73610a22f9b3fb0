use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::ortho::models::{OrthoCase, ReceivableTitle};

/// Day of month installments fall due when the case does not configure one
pub const DEFAULT_DUE_DAY: u32 = 10;

/// Builder for the receivable-title schedule of an orthodontic case.
///
/// Pure date and money arithmetic; persistence and the write-once guard live
/// in the service/repository layer.
pub struct InstallmentGenerator;

impl InstallmentGenerator {
    /// Generate the full title schedule for a case.
    ///
    /// A positive down payment produces title number 0 due `today`; monthly
    /// installments 1..=total_months fall due on the case's due day, clamped
    /// to the last valid day of each target month. Month arithmetic
    /// normalizes across year boundaries so no month is skipped or
    /// duplicated.
    ///
    /// # Errors
    /// `Validation` when `monthly_amount` or `total_months` is absent or not
    /// positive.
    pub fn generate(case: &OrthoCase, today: NaiveDate) -> Result<Vec<ReceivableTitle>> {
        let monthly_amount = case
            .monthly_amount
            .filter(|amount| *amount > Decimal::ZERO)
            .ok_or_else(|| {
                AppError::validation("Case has no monthly amount configured")
            })?;

        let total_months = match case.total_months {
            Some(months) if months > 0 => months as u32,
            _ => {
                return Err(AppError::validation(
                    "Case has no installment count configured",
                ))
            }
        };

        let due_day = match case.due_day {
            Some(day) if day >= 1 && day <= 31 => day as u32,
            Some(day) => {
                return Err(AppError::validation(format!(
                    "Due day must be between 1 and 31, got {}",
                    day
                )))
            }
            None => DEFAULT_DUE_DAY,
        };

        let mut titles = Vec::with_capacity(total_months as usize + 1);

        if case.down_payment > Decimal::ZERO {
            titles.push(ReceivableTitle::new(
                case.id,
                case.clinic_id,
                case.down_payment,
                today,
                0,
                total_months as i32,
            )?);
        }

        for i in 0..total_months {
            let due_date = due_date_for_month(case.start_date, i, due_day)?;
            titles.push(ReceivableTitle::new(
                case.id,
                case.clinic_id,
                monthly_amount,
                due_date,
                (i + 1) as i32,
                total_months as i32,
            )?);
        }

        info!(
            ortho_case_id = %case.id,
            titles = titles.len(),
            "Generated installment schedule"
        );

        Ok(titles)
    }
}

/// Due date for the installment `months_ahead` months after the case start.
///
/// Year is recomputed from the normalized month index, and the day clamps to
/// the last valid day of the target month (day 31 lands on Feb 28/29).
fn due_date_for_month(start: NaiveDate, months_ahead: u32, due_day: u32) -> Result<NaiveDate> {
    let month_index = start.month0() + months_ahead;
    let year = start.year() + (month_index / 12) as i32;
    let month = month_index % 12 + 1;

    let day = due_day.min(days_in_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        AppError::internal(format!(
            "Failed to build due date {}-{:02}-{:02}",
            year, month, day
        ))
    })
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

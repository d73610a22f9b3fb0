use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};

/// One billable installment of an orthodontic case.
///
/// Number 0 is the down payment; monthly installments run 1..=total.
/// Paid titles and titles already past due are immutable history - price
/// adjustment only ever touches future open titles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivableTitle {
    pub id: Uuid,
    pub ortho_case_id: Uuid,
    pub clinic_id: Uuid,
    pub amount: Decimal,
    /// Outstanding balance, equal to amount until payments land
    pub balance: Decimal,
    pub due_date: NaiveDate,
    pub status: TitleStatus,
    /// 0 = down payment, 1..=total_installments = monthly installment
    pub installment_number: i32,
    pub total_installments: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payment status of a receivable title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleStatus {
    /// Not yet settled
    Open,
    /// Payment received
    Paid,
}

impl TitleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for TitleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for TitleStatus {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "open" => Ok(Self::Open),
            "paid" => Ok(Self::Paid),
            _ => Err(format!("Invalid title status: {}", value)),
        }
    }
}

impl ReceivableTitle {
    /// Create an open title with balance equal to its amount
    pub fn new(
        ortho_case_id: Uuid,
        clinic_id: Uuid,
        amount: Decimal,
        due_date: NaiveDate,
        installment_number: i32,
        total_installments: i32,
    ) -> Result<Self> {
        if installment_number < 0 {
            return Err(AppError::validation(format!(
                "Installment number cannot be negative, got {}",
                installment_number
            )));
        }

        if amount <= Decimal::ZERO {
            return Err(AppError::validation("Title amount must be positive"));
        }

        let now = chrono::Utc::now().naive_utc();

        Ok(Self {
            id: Uuid::new_v4(),
            ortho_case_id,
            clinic_id,
            amount,
            balance: amount,
            due_date,
            status: TitleStatus::Open,
            installment_number,
            total_installments,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_down_payment(&self) -> bool {
        self.installment_number == 0
    }

    /// Whether a price adjustment may touch this title on `today`
    pub fn is_adjustable(&self, today: NaiveDate) -> bool {
        self.status != TitleStatus::Paid && self.due_date >= today
    }
}

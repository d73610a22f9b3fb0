use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An orthodontic treatment plan with a monthly billing schedule.
///
/// `monthly_amount`, `due_day` and `total_months` are optional at the store
/// level; the installment generator rejects cases missing the fields it
/// needs. Once generated, a case is adjusted in place, never re-generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrthoCase {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub patient_id: Uuid,
    pub total_amount: Decimal,
    pub down_payment: Decimal,
    pub monthly_amount: Option<Decimal>,
    /// Day of month installments fall due, defaulting to 10
    pub due_day: Option<i32>,
    pub total_months: Option<i32>,
    pub start_date: NaiveDate,
    pub status: CaseStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Treatment plan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    /// Active plan, eligible for bulk price adjustment
    Ativo,
    /// Treatment finished
    Concluido,
    /// Plan cancelled
    Cancelado,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ativo => "ativo",
            Self::Concluido => "concluido",
            Self::Cancelado => "cancelado",
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for CaseStatus {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "ativo" => Ok(Self::Ativo),
            "concluido" => Ok(Self::Concluido),
            "cancelado" => Ok(Self::Cancelado),
            _ => Err(format!("Invalid case status: {}", value)),
        }
    }
}

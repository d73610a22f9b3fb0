// HTTP handler for individual and bulk price adjustment.
//
// Endpoint:
// - POST /ortho/price-adjustments - re-price future open titles by percent
//   or fixed value, for one case or a whole clinic
//
// The caller's identity arrives in the X-User-Id header (set by the
// authentication layer in front of this service) and lands in the audit log.

use actix_web::{web, HttpRequest, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::ortho::services::AdjustmentService;

const USER_ID_HEADER: &str = "x-user-id";

/// Request for POST /ortho/price-adjustments
#[derive(Debug, Deserialize)]
pub struct AdjustPricesRequest {
    pub mode: AdjustmentMode,
    pub ortho_case_id: Option<Uuid>,
    pub clinic_id: Option<Uuid>,
    /// Percentage applied on the current stored amount
    pub percentual_reajuste: Option<Decimal>,
    /// Explicit new monthly amount, wins over the percentage
    pub valor_fixo_novo: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentMode {
    Individual,
    Bulk,
}

/// Response for an individual adjustment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualAdjustmentResponse {
    pub ortho_case_id: Uuid,
    pub valor_anterior: String,
    pub novo_valor: String,
    pub titulos_updated: i64,
}

/// Response for a bulk adjustment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAdjustmentResponse {
    pub cases_updated: i64,
    pub titulos_updated: i64,
}

/// POST /ortho/price-adjustments
///
/// # Request Body
/// ```json
/// {
///   "mode": "individual",
///   "ortho_case_id": "...",
///   "percentual_reajuste": 10
/// }
/// ```
///
/// # Business Rules
/// - new amount = valor_fixo_novo, or current * (1 + percentual/100),
///   rounded half-up to 2 decimals
/// - only titles with status != paid and due_date >= today change
/// - bulk mode covers every case with status "ativo" in the clinic;
///   zero active cases is a success with zero counts
///
/// # Returns
/// - 200: adjustment applied
/// - 400: missing mode target, missing percent/fixed, or missing X-User-Id
/// - 404: case not found (individual mode)
pub async fn adjust_prices(
    req: HttpRequest,
    request: web::Json<AdjustPricesRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let adjusted_by = caller_id(&req)?;
    let service = AdjustmentService::new(pool.get_ref().clone());

    match request.mode {
        AdjustmentMode::Individual => {
            let ortho_case_id = request.ortho_case_id.ok_or_else(|| {
                AppError::validation("ortho_case_id is required for individual adjustment")
            })?;

            let outcome = service
                .adjust_case(
                    ortho_case_id,
                    request.percentual_reajuste,
                    request.valor_fixo_novo,
                    adjusted_by,
                )
                .await?;

            let response = IndividualAdjustmentResponse {
                ortho_case_id,
                valor_anterior: outcome
                    .previous_amount
                    .map(|a| a.to_string())
                    .unwrap_or_default(),
                novo_valor: outcome
                    .new_amount
                    .map(|a| a.to_string())
                    .unwrap_or_default(),
                titulos_updated: outcome.titles_updated,
            };

            Ok(HttpResponse::Ok().json(response))
        }
        AdjustmentMode::Bulk => {
            let clinic_id = request.clinic_id.ok_or_else(|| {
                AppError::validation("clinic_id is required for bulk adjustment")
            })?;

            let outcome = service
                .adjust_clinic(
                    clinic_id,
                    request.percentual_reajuste,
                    request.valor_fixo_novo,
                    adjusted_by,
                )
                .await?;

            let response = BulkAdjustmentResponse {
                cases_updated: outcome.cases_updated,
                titulos_updated: outcome.titles_updated,
            };

            Ok(HttpResponse::Ok().json(response))
        }
    }
}

/// Authenticated caller id from the X-User-Id header
fn caller_id(req: &HttpRequest) -> Result<Uuid> {
    let raw = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::validation("X-User-Id header is required"))?;

    raw.parse()
        .map_err(|_| AppError::validation("X-User-Id must be a UUID"))
}

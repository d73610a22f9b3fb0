// HTTP handlers for installment schedules.
//
// Endpoints:
// - POST /ortho/cases/{id}/installments - generate the schedule (write-once)
// - GET  /ortho/cases/{id}/installments - list titles for a case

use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::Result;
use crate::modules::ortho::models::ReceivableTitle;
use crate::modules::ortho::services::InstallmentService;

/// Response for a single receivable title
#[derive(Debug, Serialize)]
pub struct TitleResponse {
    pub id: Uuid,
    pub installment_number: i32,
    pub total_installments: i32,
    pub amount: String,
    pub balance: String,
    pub due_date: String,
    pub status: String,
}

impl From<ReceivableTitle> for TitleResponse {
    fn from(title: ReceivableTitle) -> Self {
        Self {
            id: title.id,
            installment_number: title.installment_number,
            total_installments: title.total_installments,
            amount: title.amount.to_string(),
            balance: title.balance.to_string(),
            due_date: title.due_date.to_string(),
            status: title.status.to_string(),
        }
    }
}

/// Response for POST /ortho/cases/{id}/installments
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInstallmentsResponse {
    pub ortho_case_id: Uuid,
    pub titles_created: usize,
}

/// Response for GET /ortho/cases/{id}/installments
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetInstallmentsResponse {
    pub ortho_case_id: Uuid,
    pub titles: Vec<TitleResponse>,
}

/// POST /ortho/cases/{ortho_case_id}/installments
///
/// Generates the receivable-title schedule for a case. Generation is
/// write-once: a repeat call fails with 409 and creates nothing.
///
/// # Returns
/// - 201: `{"orthoCaseId", "titlesCreated"}`
/// - 400: case missing monthly amount or installment count
/// - 404: case not found
/// - 409: installments already generated
pub async fn generate_installments(
    ortho_case_id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let service = InstallmentService::new(pool.get_ref().clone());

    let titles = service.generate_for_case(*ortho_case_id).await?;

    let response = GenerateInstallmentsResponse {
        ortho_case_id: *ortho_case_id,
        titles_created: titles.len(),
    };

    Ok(HttpResponse::Created().json(response))
}

/// GET /ortho/cases/{ortho_case_id}/installments
///
/// Returns the title schedule for a case, ordered by installment number.
pub async fn get_installments(
    ortho_case_id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let service = InstallmentService::new(pool.get_ref().clone());

    let titles = service.get_titles(*ortho_case_id).await?;

    let response = GetInstallmentsResponse {
        ortho_case_id: *ortho_case_id,
        titles: titles.into_iter().map(TitleResponse::from).collect(),
    };

    Ok(HttpResponse::Ok().json(response))
}

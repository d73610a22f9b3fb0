// HTTP handler for slot availability.
//
// Endpoint:
// - GET /scheduling/availability?clinic_id=&professional_id=&date= - free slots for one day

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::scheduling::services::AvailabilityService;

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub clinic_id: Uuid,
    pub professional_id: Uuid,
    /// YYYY-MM-DD
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub date: String,
    pub professional_id: Uuid,
    /// Free slot start times as HH:MM, ascending
    pub slots: Vec<String>,
}

/// GET /scheduling/availability
///
/// Returns the free slot start times for a professional on one day.
/// Missing or inactive working-hours configuration yields an empty list.
///
/// # Returns
/// - 200: `{"date", "professional_id", "slots": ["08:00", ...]}`
/// - 400: malformed date or query parameters
pub async fn get_availability(
    query: web::Query<AvailabilityQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let date = NaiveDate::parse_from_str(query.date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation("date must be YYYY-MM-DD"))?;

    let service = AvailabilityService::new(pool.get_ref().clone());
    let slots = service
        .available_slots(query.clinic_id, query.professional_id, date)
        .await?;

    let response = AvailabilityResponse {
        date: date.to_string(),
        professional_id: query.professional_id,
        slots: slots.iter().map(|s| s.format("%H:%M").to_string()).collect(),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Configure scheduling routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/scheduling").route("/availability", web::get().to(get_availability)),
    );
}

use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use tracing::info;

use crate::core::Result;
use crate::modules::scheduling::models::day_of_week_index;
use crate::modules::scheduling::repositories::ScheduleRepository;
use crate::modules::scheduling::services::SlotCalculator;

/// Service resolving schedule configuration and computing free slots
pub struct AvailabilityService {
    repository: ScheduleRepository,
}

impl AvailabilityService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ScheduleRepository::new(pool),
        }
    }

    /// Compute the free slot start times for a professional on `date`.
    ///
    /// Configuration resolves professional-first with clinic fallback; a
    /// missing or inactive configuration yields an empty list rather than
    /// an error.
    pub async fn available_slots(
        &self,
        clinic_id: uuid::Uuid,
        professional_id: uuid::Uuid,
        date: NaiveDate,
    ) -> Result<Vec<NaiveTime>> {
        let day_of_week = day_of_week_index(date.weekday());

        let hours = match self
            .repository
            .find_working_hours(clinic_id, professional_id, day_of_week)
            .await?
        {
            Some(hours) => hours,
            None => {
                info!(
                    clinic_id = %clinic_id,
                    professional_id = %professional_id,
                    day_of_week,
                    "No working hours configured"
                );
                return Ok(Vec::new());
            }
        };

        if !hours.active {
            return Ok(Vec::new());
        }
        hours.validate()?;

        let bookings = self
            .repository
            .find_bookings_for_day(professional_id, date)
            .await?;

        let now = Utc::now().naive_utc();
        Ok(SlotCalculator::available_slots(&hours, &bookings, date, now))
    }
}

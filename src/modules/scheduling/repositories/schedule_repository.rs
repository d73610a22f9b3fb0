// Store access for working-hours configuration and day bookings.
//
// Resolution order for a schedule: professional-specific row first, then the
// clinic-wide row (professional_id IS NULL). Bookings exclude cancelled
// appointments.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::scheduling::models::{Booking, WorkingHours};

/// Repository for schedule configuration and booking lookups
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve the working-hours row for a professional on a weekday.
    ///
    /// Returns the professional-specific row when one exists, otherwise the
    /// clinic-wide row, otherwise `None`.
    pub async fn find_working_hours(
        &self,
        clinic_id: Uuid,
        professional_id: Uuid,
        day_of_week: i16,
    ) -> Result<Option<WorkingHours>> {
        let professional_row = sqlx::query_as::<_, WorkingHoursRow>(
            r#"
            SELECT
                id, clinic_id, professional_id, day_of_week, start_time,
                end_time, lunch_start, lunch_end, slot_interval_minutes, active
            FROM working_hours
            WHERE clinic_id = $1 AND professional_id = $2 AND day_of_week = $3
            "#,
        )
        .bind(clinic_id)
        .bind(professional_id)
        .bind(day_of_week)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch working hours: {}", e)))?;

        if let Some(row) = professional_row {
            return Ok(Some(row.into()));
        }

        let clinic_row = sqlx::query_as::<_, WorkingHoursRow>(
            r#"
            SELECT
                id, clinic_id, professional_id, day_of_week, start_time,
                end_time, lunch_start, lunch_end, slot_interval_minutes, active
            FROM working_hours
            WHERE clinic_id = $1 AND professional_id IS NULL AND day_of_week = $2
            "#,
        )
        .bind(clinic_id)
        .bind(day_of_week)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch working hours: {}", e)))?;

        Ok(clinic_row.map(WorkingHours::from))
    }

    /// Fetch the professional's non-cancelled bookings for one day
    pub async fn find_bookings_for_day(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Booking>> {
        let day_start = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| AppError::internal("Invalid day start"))?;
        let day_end = day_start + chrono::Duration::days(1);

        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT starts_at, duration_minutes
            FROM appointments
            WHERE professional_id = $1
              AND starts_at >= $2
              AND starts_at < $3
              AND status <> 'cancelled'
            ORDER BY starts_at ASC
            "#,
        )
        .bind(professional_id)
        .bind(day_start)
        .bind(day_end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch bookings: {}", e)))?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }
}

/// Database row representation for the working_hours table
#[derive(sqlx::FromRow)]
struct WorkingHoursRow {
    id: Uuid,
    clinic_id: Uuid,
    professional_id: Option<Uuid>,
    day_of_week: i16,
    start_time: NaiveTime,
    end_time: NaiveTime,
    lunch_start: Option<NaiveTime>,
    lunch_end: Option<NaiveTime>,
    slot_interval_minutes: i32,
    active: bool,
}

impl From<WorkingHoursRow> for WorkingHours {
    fn from(row: WorkingHoursRow) -> Self {
        WorkingHours {
            id: row.id,
            clinic_id: row.clinic_id,
            professional_id: row.professional_id,
            day_of_week: row.day_of_week,
            start_time: row.start_time,
            end_time: row.end_time,
            lunch_start: row.lunch_start,
            lunch_end: row.lunch_end,
            slot_interval_minutes: row.slot_interval_minutes,
            active: row.active,
        }
    }
}

/// Database row representation for a booking span
#[derive(sqlx::FromRow)]
struct BookingRow {
    starts_at: NaiveDateTime,
    duration_minutes: Option<i32>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            starts_at: row.starts_at,
            duration_minutes: row.duration_minutes,
        }
    }
}

use chrono::{NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};

/// Working-hours configuration for one weekday.
///
/// A row either belongs to a professional (`professional_id` set) or to the
/// whole clinic (`professional_id` NULL). Professional rows take priority
/// when resolving the schedule for a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingHours {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub professional_id: Option<Uuid>,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub lunch_start: Option<NaiveTime>,
    pub lunch_end: Option<NaiveTime>,
    pub slot_interval_minutes: i32,
    pub active: bool,
}

impl WorkingHours {
    /// Validate a configuration row loaded from the store
    pub fn validate(&self) -> Result<()> {
        if self.slot_interval_minutes <= 0 {
            return Err(AppError::validation(format!(
                "Slot interval must be positive, got {}",
                self.slot_interval_minutes
            )));
        }

        if self.end_time <= self.start_time {
            return Err(AppError::validation(format!(
                "Working hours end ({}) must be after start ({})",
                self.end_time, self.start_time
            )));
        }

        if let (Some(lunch_start), Some(lunch_end)) = (self.lunch_start, self.lunch_end) {
            if lunch_end <= lunch_start {
                return Err(AppError::validation(format!(
                    "Lunch end ({}) must be after lunch start ({})",
                    lunch_end, lunch_start
                )));
            }
        }

        Ok(())
    }
}

/// An existing, non-cancelled appointment occupying a contiguous span
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub starts_at: NaiveDateTime,
    /// Defaults to the schedule's slot interval when absent
    pub duration_minutes: Option<i32>,
}

/// Map a chrono weekday onto the 0 = Sunday convention used by the
/// working_hours table
pub fn day_of_week_index(weekday: Weekday) -> i16 {
    weekday.num_days_from_sunday() as i16
}

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::debug;

use crate::modules::scheduling::models::{Booking, WorkingHours};

/// Free-slot computation over a day's working hours and existing bookings.
///
/// Pure arithmetic on minutes-since-midnight; callers fetch configuration
/// and bookings and format the result.
pub struct SlotCalculator;

impl SlotCalculator {
    /// Compute the free slot start times for `date`.
    ///
    /// Candidates run from `start_time` in `slot_interval_minutes` steps,
    /// strictly before `end_time`. A candidate is excluded (not advanced
    /// past) when it falls inside the lunch break, when a booking occupies
    /// it, or, for the current day, when it is at or before `now`.
    ///
    /// Bookings are assumed aligned to the interval grid; a zero-duration
    /// booking still occupies its first slot.
    pub fn available_slots(
        hours: &WorkingHours,
        bookings: &[Booking],
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> Vec<NaiveTime> {
        if !hours.active || hours.slot_interval_minutes <= 0 {
            return Vec::new();
        }

        let interval = hours.slot_interval_minutes as u32;
        let start_min = minutes_of(hours.start_time);
        let end_min = minutes_of(hours.end_time);
        if end_min <= start_min {
            return Vec::new();
        }

        let lunch = match (hours.lunch_start, hours.lunch_end) {
            (Some(lunch_start), Some(lunch_end)) => {
                Some((minutes_of(lunch_start), minutes_of(lunch_end)))
            }
            _ => None,
        };

        let occupied = Self::occupied_minutes(bookings, date, interval);

        let today = date == now.date();
        let now_min = minutes_of(now.time());

        let mut slots = Vec::new();
        let mut candidate = start_min;
        while candidate < end_min {
            let in_lunch = lunch
                .map(|(lunch_start, lunch_end)| candidate >= lunch_start && candidate < lunch_end)
                .unwrap_or(false);
            let in_past = today && candidate <= now_min;

            if !in_lunch && !in_past && !occupied.contains(&candidate) {
                if let Some(time) = time_from_minutes(candidate) {
                    slots.push(time);
                }
            }

            candidate += interval;
        }

        debug!(
            date = %date,
            bookings = bookings.len(),
            slots = slots.len(),
            "Computed available slots"
        );

        slots
    }

    /// Mark every interval-aligned minute offset a booking covers, from its
    /// start for its full duration. Duration defaults to one interval; a
    /// zero-duration booking still claims its first slot.
    fn occupied_minutes(bookings: &[Booking], date: NaiveDate, interval: u32) -> HashSet<u32> {
        let mut occupied = HashSet::new();

        for booking in bookings {
            if booking.starts_at.date() != date {
                continue;
            }

            let start = minutes_of(booking.starts_at.time());
            let duration = booking
                .duration_minutes
                .filter(|d| *d >= 0)
                .map(|d| d as u32)
                .unwrap_or(interval)
                .max(1);

            let mut offset = 0;
            while offset < duration {
                occupied.insert(start + offset);
                offset += interval;
            }
        }

        occupied
    }
}

fn minutes_of(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight() / 60
}

fn time_from_minutes(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

// Property-based tests for the slot availability calculator:
// slots stay inside working hours, stay on the interval grid, and never
// collide with lunch, bookings or the past.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use proptest::prelude::*;
use uuid::Uuid;

use clinicore::scheduling::models::{Booking, WorkingHours};
use clinicore::scheduling::SlotCalculator;

fn hours(
    start: (u32, u32),
    end: (u32, u32),
    lunch: Option<((u32, u32), (u32, u32))>,
    interval: i32,
) -> WorkingHours {
    WorkingHours {
        id: Uuid::new_v4(),
        clinic_id: Uuid::new_v4(),
        professional_id: None,
        day_of_week: 1,
        start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        lunch_start: lunch.map(|(s, _)| NaiveTime::from_hms_opt(s.0, s.1, 0).unwrap()),
        lunch_end: lunch.map(|(_, e)| NaiveTime::from_hms_opt(e.0, e.1, 0).unwrap()),
        slot_interval_minutes: interval,
        active: true,
    }
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
}

fn other_day_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn minutes(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight() / 60
}

/// Slots never start before working hours or at/after the end
#[test]
fn test_slots_bounded_by_working_hours() {
    let config = hours((8, 0), (18, 0), None, 30);
    let slots = SlotCalculator::available_slots(&config, &[], day(), other_day_now());

    assert!(!slots.is_empty());
    for slot in &slots {
        assert!(*slot >= config.start_time, "slot {} before start", slot);
        assert!(*slot < config.end_time, "slot {} not before end", slot);
    }
}

/// Every interval-aligned slot covered by a booking is absent
#[test]
fn test_booked_spans_absent_from_result() {
    let config = hours((8, 0), (18, 0), None, 30);
    let bookings = vec![
        Booking {
            starts_at: day().and_hms_opt(9, 0, 0).unwrap(),
            duration_minutes: Some(90),
        },
        Booking {
            starts_at: day().and_hms_opt(15, 30, 0).unwrap(),
            duration_minutes: None,
        },
    ];

    let slots = SlotCalculator::available_slots(&config, &bookings, day(), other_day_now());

    for blocked in ["09:00", "09:30", "10:00", "15:30"] {
        let time = NaiveTime::parse_from_str(blocked, "%H:%M").unwrap();
        assert!(!slots.contains(&time), "booked slot {} returned", blocked);
    }

    // neighbours survive
    assert!(slots.contains(&NaiveTime::from_hms_opt(8, 30, 0).unwrap()));
    assert!(slots.contains(&NaiveTime::from_hms_opt(10, 30, 0).unwrap()));
    assert!(slots.contains(&NaiveTime::from_hms_opt(16, 0, 0).unwrap()));
}

/// With now = 14:05 on the requested day and a 30-minute grid, nothing at
/// or before 14:00 comes back
#[test]
fn test_current_day_cuts_past_slots() {
    let config = hours((8, 0), (18, 0), None, 30);
    let now = day().and_hms_opt(14, 5, 0).unwrap();

    let slots = SlotCalculator::available_slots(&config, &[], day(), now);

    let cutoff = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
    assert!(slots.iter().all(|s| *s > cutoff));
    assert_eq!(slots.first(), Some(&NaiveTime::from_hms_opt(14, 30, 0).unwrap()));
}

/// Lunch excludes its slots without shifting the rest of the grid
#[test]
fn test_lunch_break_excluded() {
    let config = hours((8, 0), (17, 0), Some(((12, 0), (13, 30))), 30);
    let slots = SlotCalculator::available_slots(&config, &[], day(), other_day_now());

    for lunch_slot in ["12:00", "12:30", "13:00"] {
        let time = NaiveTime::parse_from_str(lunch_slot, "%H:%M").unwrap();
        assert!(!slots.contains(&time), "lunch slot {} returned", lunch_slot);
    }
    assert!(slots.contains(&NaiveTime::from_hms_opt(11, 30, 0).unwrap()));
    assert!(slots.contains(&NaiveTime::from_hms_opt(13, 30, 0).unwrap()));
}

/// A fully booked day yields nothing
#[test]
fn test_fully_booked_day_is_empty() {
    let config = hours((9, 0), (11, 0), None, 30);
    let bookings = vec![Booking {
        starts_at: day().and_hms_opt(9, 0, 0).unwrap(),
        duration_minutes: Some(120),
    }];

    let slots = SlotCalculator::available_slots(&config, &bookings, day(), other_day_now());
    assert!(slots.is_empty());
}

proptest! {
    /// Property: every slot is inside [start, end) and on the interval grid
    #[test]
    fn prop_slots_within_hours_and_aligned(
        start_hour in 6u32..10u32,
        span_hours in 1u32..10u32,
        interval in prop::sample::select(vec![10i32, 15, 20, 30, 60]),
    ) {
        let end_hour = (start_hour + span_hours).min(23);
        let config = hours((start_hour, 0), (end_hour, 0), None, interval);

        let slots = SlotCalculator::available_slots(&config, &[], day(), other_day_now());

        let start_min = start_hour * 60;
        for slot in &slots {
            let slot_min = minutes(*slot);
            prop_assert!(slot_min >= start_min);
            prop_assert!(slot_min < end_hour * 60);
            prop_assert_eq!((slot_min - start_min) % interval as u32, 0);
        }
    }

    /// Property: the result is strictly ascending
    #[test]
    fn prop_slots_strictly_ascending(
        interval in prop::sample::select(vec![15i32, 30, 45, 60]),
    ) {
        let config = hours((8, 0), (18, 0), Some(((12, 0), (13, 0))), interval);
        let slots = SlotCalculator::available_slots(&config, &[], day(), other_day_now());

        for pair in slots.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    /// Property: a grid-aligned booking removes exactly its covered slots
    #[test]
    fn prop_booking_removes_covered_slots(
        booked_slot in 0u32..16u32,
        duration_slots in 1u32..4u32,
    ) {
        let interval = 30u32;
        let config = hours((8, 0), (16, 0), None, interval as i32);

        let start_min = 8 * 60 + booked_slot * interval;
        let booking = Booking {
            starts_at: day()
                .and_hms_opt(start_min / 60, start_min % 60, 0)
                .unwrap(),
            duration_minutes: Some((duration_slots * interval) as i32),
        };

        let free = SlotCalculator::available_slots(&config, &[], day(), other_day_now());
        let slots =
            SlotCalculator::available_slots(&config, &[booking], day(), other_day_now());

        for k in 0..duration_slots {
            let blocked = start_min + k * interval;
            if blocked < 16 * 60 {
                prop_assert!(!slots.iter().any(|s| minutes(*s) == blocked));
            }
        }

        // exactly the covered slots disappeared
        let expected_removed = (0..duration_slots)
            .map(|k| start_min + k * interval)
            .filter(|m| *m < 16 * 60)
            .count();
        prop_assert_eq!(slots.len(), free.len() - expected_removed);
    }
}

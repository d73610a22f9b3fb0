// Property-based tests for installment generation: month rollover never
// skips or duplicates a month, due days clamp to short months, and the
// schedule carries the case amounts unchanged.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use clinicore::ortho::models::{CaseStatus, OrthoCase};
use clinicore::ortho::InstallmentGenerator;

fn case(
    down_payment: Decimal,
    monthly_amount: Option<Decimal>,
    due_day: Option<i32>,
    total_months: Option<i32>,
    start_date: NaiveDate,
) -> OrthoCase {
    let now = chrono::Utc::now().naive_utc();
    OrthoCase {
        id: Uuid::new_v4(),
        clinic_id: Uuid::new_v4(),
        patient_id: Uuid::new_v4(),
        total_amount: dec!(6000.00),
        down_payment,
        monthly_amount,
        due_day,
        total_months,
        start_date,
        status: CaseStatus::Ativo,
        created_at: now,
        updated_at: now,
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

/// Leap-year fixture: 12 months from 2024-01-31 with due day 31
/// clamps to 2024-02-29 and 2024-04-30 and never skips a month
#[test]
fn test_january_31_due_day_31_leap_year() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let plan = case(dec!(0), Some(dec!(500.00)), Some(31), Some(12), start);

    let titles = InstallmentGenerator::generate(&plan, today()).unwrap();

    assert_eq!(titles.len(), 12);

    let due_dates: Vec<NaiveDate> = titles.iter().map(|t| t.due_date).collect();
    assert_eq!(due_dates[1], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    assert_eq!(due_dates[3], NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());

    // months 1..=12 of 2024, each exactly once
    for (i, due) in due_dates.iter().enumerate() {
        assert_eq!(due.year(), 2024);
        assert_eq!(due.month(), i as u32 + 1);
    }
}

/// Non-leap February clamps to the 28th
#[test]
fn test_non_leap_february_clamps_to_28() {
    let start = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
    let plan = case(dec!(0), Some(dec!(500.00)), Some(30), Some(3), start);

    let titles = InstallmentGenerator::generate(&plan, today()).unwrap();
    assert_eq!(titles[1].due_date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    assert_eq!(titles[2].due_date, NaiveDate::from_ymd_opt(2025, 3, 30).unwrap());
}

/// Down payment becomes title 0 due today, ahead of the monthly titles
#[test]
fn test_down_payment_title() {
    let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let plan = case(dec!(800.00), Some(dec!(400.00)), Some(10), Some(10), start);

    let titles = InstallmentGenerator::generate(&plan, today()).unwrap();

    assert_eq!(titles.len(), 11);
    assert_eq!(titles[0].installment_number, 0);
    assert_eq!(titles[0].amount, dec!(800.00));
    assert_eq!(titles[0].due_date, today());
    assert_eq!(titles[1].installment_number, 1);
}

/// Missing configuration is rejected before anything is produced
#[test]
fn test_missing_fields_rejected() {
    let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    let no_amount = case(dec!(0), None, Some(10), Some(10), start);
    assert!(InstallmentGenerator::generate(&no_amount, today()).is_err());

    let no_months = case(dec!(0), Some(dec!(400.00)), Some(10), None, start);
    assert!(InstallmentGenerator::generate(&no_months, today()).is_err());
}

proptest! {
    /// Property: one title per month (plus optional down payment), amounts
    /// carried through unchanged
    #[test]
    fn prop_title_count_and_amounts(
        year in 2020i32..2030i32,
        month in 1u32..=12u32,
        start_day in 1u32..=28u32,
        months in 1i32..=36i32,
        cents in 10_000i64..1_000_000i64,
        with_down_payment in any::<bool>(),
    ) {
        let monthly = Decimal::new(cents, 2);
        let down = if with_down_payment { dec!(250.00) } else { dec!(0) };
        let start = NaiveDate::from_ymd_opt(year, month, start_day).unwrap();

        let plan = case(down, Some(monthly), Some(10), Some(months), start);
        let titles = InstallmentGenerator::generate(&plan, today()).unwrap();

        let expected = months as usize + usize::from(with_down_payment);
        prop_assert_eq!(titles.len(), expected);

        for title in titles.iter().filter(|t| t.installment_number > 0) {
            prop_assert_eq!(title.amount, monthly);
            prop_assert_eq!(title.balance, monthly);
            prop_assert_eq!(title.total_installments, months);
        }
    }

    /// Property: consecutive monthly due dates advance exactly one month,
    /// across year boundaries
    #[test]
    fn prop_months_consecutive(
        year in 2020i32..2030i32,
        month in 1u32..=12u32,
        due_day in 1i32..=31i32,
        months in 2i32..=30i32,
    ) {
        let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        let plan = case(dec!(0), Some(dec!(500.00)), Some(due_day), Some(months), start);

        let titles = InstallmentGenerator::generate(&plan, today()).unwrap();

        for pair in titles.windows(2) {
            let a = pair[0].due_date;
            let b = pair[1].due_date;
            let a_index = a.year() * 12 + a.month0() as i32;
            let b_index = b.year() * 12 + b.month0() as i32;
            prop_assert_eq!(b_index - a_index, 1, "months {} -> {} not consecutive", a, b);
        }
    }

    /// Property: the due day never exceeds the requested day and only
    /// shrinks when the month is too short
    #[test]
    fn prop_due_day_clamped(
        year in 2020i32..2030i32,
        month in 1u32..=12u32,
        due_day in 1i32..=31i32,
        months in 1i32..=24i32,
    ) {
        let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        let plan = case(dec!(0), Some(dec!(500.00)), Some(due_day), Some(months), start);

        let titles = InstallmentGenerator::generate(&plan, today()).unwrap();

        for title in &titles {
            prop_assert!(title.due_date.day() <= due_day as u32);
            if title.due_date.day() < due_day as u32 {
                // clamped: the next day would leave the month
                prop_assert!(title.due_date.succ_opt().unwrap().month() != title.due_date.month());
            }
        }
    }
}

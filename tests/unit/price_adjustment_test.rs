// Property-based tests for the price-adjustment computation and the
// future-open-titles predicate.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use clinicore::ortho::models::{ReceivableTitle, TitleStatus};
use clinicore::ortho::AdjustmentService;

/// +10% on 500.00 yields 550.00
#[test]
fn test_ten_percent_on_five_hundred() {
    let new_amount =
        AdjustmentService::compute_new_amount(dec!(500.00), Some(dec!(10)), None).unwrap();
    assert_eq!(new_amount, dec!(550.00));
}

/// Fractional percentages round half-up to 2 decimals
#[test]
fn test_fractional_percent_rounds_half_up() {
    // 455.55 * 1.033 = 470.58315 -> 470.58
    let new_amount =
        AdjustmentService::compute_new_amount(dec!(455.55), Some(dec!(3.3)), None).unwrap();
    assert_eq!(new_amount, dec!(470.58));

    // 150.50 * 1.01 = 152.005 -> 152.01 (half-up, not banker's)
    let new_amount =
        AdjustmentService::compute_new_amount(dec!(150.50), Some(dec!(1)), None).unwrap();
    assert_eq!(new_amount, dec!(152.01));
}

/// A fixed value replaces the amount outright
#[test]
fn test_fixed_value_replaces_amount() {
    let new_amount =
        AdjustmentService::compute_new_amount(dec!(500.00), None, Some(dec!(615.90))).unwrap();
    assert_eq!(new_amount, dec!(615.90));
}

/// Neither percent nor fixed value fails validation up front
#[test]
fn test_missing_both_fields_rejected() {
    assert!(AdjustmentService::compute_new_amount(dec!(500.00), None, None).is_err());
}

/// Only open titles due today or later are adjustable
#[test]
fn test_adjustable_predicate_covers_future_open_titles() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    let mut title = ReceivableTitle::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        dec!(500.00),
        NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
        2,
        12,
    )
    .unwrap();

    assert!(title.is_adjustable(today));

    // paid titles are immutable history
    title.status = TitleStatus::Paid;
    assert!(!title.is_adjustable(today));

    // past-due open titles are immutable history too
    title.status = TitleStatus::Open;
    title.due_date = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
    assert!(!title.is_adjustable(today));

    // due exactly today still adjusts
    title.due_date = today;
    assert!(title.is_adjustable(today));
}

proptest! {
    /// Property: percentage adjustment always lands on 2 decimal places
    #[test]
    fn prop_result_scale_is_monetary(
        cents in 1_000i64..10_000_000i64,
        percent_tenths in -500i64..2_000i64,
    ) {
        let current = Decimal::new(cents, 2);
        let percent = Decimal::new(percent_tenths, 1);

        if let Ok(adjusted) =
            AdjustmentService::compute_new_amount(current, Some(percent), None)
        {
            prop_assert!(adjusted.scale() <= 2);
            prop_assert!(adjusted > Decimal::ZERO);
        }
    }

    /// Property: zero percent is the identity
    #[test]
    fn prop_zero_percent_identity(cents in 1_000i64..10_000_000i64) {
        let current = Decimal::new(cents, 2);
        let adjusted =
            AdjustmentService::compute_new_amount(current, Some(dec!(0)), None).unwrap();
        prop_assert_eq!(adjusted, current);
    }

    /// Property: the computation reads only the current value, so applying
    /// the same percent to the stored result is plain compounding, nothing
    /// hidden accumulates
    #[test]
    fn prop_repeat_reads_stored_value(
        cents in 10_000i64..1_000_000i64,
        percent in 1i64..50i64,
    ) {
        let current = Decimal::new(cents, 2);
        let percent = Decimal::from(percent);

        let once =
            AdjustmentService::compute_new_amount(current, Some(percent), None).unwrap();
        let twice =
            AdjustmentService::compute_new_amount(once, Some(percent), None).unwrap();

        let factor = Decimal::ONE + percent / Decimal::from(100);
        let expected = (once * factor)
            .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        prop_assert_eq!(twice, expected);
    }

    /// Property: a positive fixed value always wins over any percentage
    #[test]
    fn prop_fixed_wins(
        cents in 1_000i64..10_000_000i64,
        fixed_cents in 1i64..10_000_000i64,
        percent in 0i64..100i64,
    ) {
        let current = Decimal::new(cents, 2);
        let fixed = Decimal::new(fixed_cents, 2);

        let adjusted = AdjustmentService::compute_new_amount(
            current,
            Some(Decimal::from(percent)),
            Some(fixed),
        )
        .unwrap();
        prop_assert_eq!(adjusted, fixed);
    }
}

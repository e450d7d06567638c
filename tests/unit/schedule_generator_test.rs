// Schedule generation invariants: cent-exact sums, contiguous
// sequences, deterministic remainder placement.

use nvjmios::plans::services::schedule::{assign_monthly_due_dates, generate_schedule};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn sum_matches_total_exactly() {
    let schedule = generate_schedule("plan-1", dec!(100.00), 3);
    let sum: Decimal = schedule.iter().map(|i| i.amount).sum();
    assert_eq!(sum, dec!(100.00));
}

#[test]
fn remainder_goes_to_earliest_installments() {
    let schedule = generate_schedule("plan-1", dec!(10.00), 3);
    let amounts: Vec<Decimal> = schedule.iter().map(|i| i.amount).collect();

    // 1000 cents / 3 = 333 with remainder 1: the first installment
    // absorbs the extra cent
    assert_eq!(amounts, vec![dec!(3.34), dec!(3.33), dec!(3.33)]);
}

#[test]
fn two_cent_remainder_spreads_to_first_two() {
    let schedule = generate_schedule("plan-1", dec!(1.00), 6);
    let amounts: Vec<Decimal> = schedule.iter().map(|i| i.amount).collect();

    // 100 / 6 = 16 remainder 4
    assert_eq!(
        amounts,
        vec![dec!(0.17), dec!(0.17), dec!(0.17), dec!(0.17), dec!(0.16), dec!(0.16)]
    );
}

#[test]
fn sequences_are_one_based_and_contiguous() {
    let schedule = generate_schedule("plan-1", dec!(250.00), 5);
    let sequences: Vec<i32> = schedule.iter().map(|i| i.sequence).collect();
    assert_eq!(sequences, vec![1, 2, 3, 4, 5]);
}

#[test]
fn generated_installments_start_unpaid_with_no_due_date() {
    let schedule = generate_schedule("plan-1", dec!(90.00), 3);
    assert!(schedule.iter().all(|i| !i.is_paid));
    assert!(schedule.iter().all(|i| i.due_date.is_none()));
    assert!(schedule.iter().all(|i| i.paid_at.is_none()));
}

#[test]
fn non_positive_inputs_yield_empty_schedule() {
    assert!(generate_schedule("plan-1", dec!(0.00), 3).is_empty());
    assert!(generate_schedule("plan-1", dec!(-50.00), 3).is_empty());
    assert!(generate_schedule("plan-1", dec!(100.00), 0).is_empty());
    assert!(generate_schedule("plan-1", dec!(100.00), -1).is_empty());
}

#[test]
fn single_installment_carries_whole_total() {
    let schedule = generate_schedule("plan-1", dec!(123.45), 1);
    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule[0].amount, dec!(123.45));
}

#[test]
fn monthly_due_dates_step_by_calendar_month() {
    let mut schedule = generate_schedule("plan-1", dec!(300.00), 3);
    let first_due = chrono::NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    assign_monthly_due_dates(&mut schedule, first_due);

    assert_eq!(schedule[0].due_date, chrono::NaiveDate::from_ymd_opt(2025, 1, 31));
    // chrono clamps to the end of shorter months
    assert_eq!(schedule[1].due_date, chrono::NaiveDate::from_ymd_opt(2025, 2, 28));
    assert_eq!(schedule[2].due_date, chrono::NaiveDate::from_ymd_opt(2025, 3, 31));
}

proptest! {
    /// Property: installment amounts always sum exactly to the total
    #[test]
    fn prop_sum_invariant(
        total_cents in 1i64..100_000_000i64,
        count in 1i32..60i32,
    ) {
        let total = Decimal::new(total_cents, 2);
        let schedule = generate_schedule("plan-1", total, count);

        let sum: Decimal = schedule.iter().map(|i| i.amount).sum();
        prop_assert_eq!(sum, total);
        prop_assert_eq!(schedule.len(), count as usize);
    }

    /// Property: sequences are exactly 1..=count with no gaps
    #[test]
    fn prop_sequence_invariant(
        total_cents in 1i64..10_000_000i64,
        count in 1i32..40i32,
    ) {
        let schedule = generate_schedule("plan-1", Decimal::new(total_cents, 2), count);

        for (i, installment) in schedule.iter().enumerate() {
            prop_assert_eq!(installment.sequence, (i + 1) as i32);
        }
    }

    /// Property: amounts differ by at most one cent, and never increase
    /// along the sequence (extra cents sit at the front)
    #[test]
    fn prop_amounts_monotone_within_one_cent(
        total_cents in 1i64..10_000_000i64,
        count in 2i32..40i32,
    ) {
        let schedule = generate_schedule("plan-1", Decimal::new(total_cents, 2), count);
        let first = schedule.first().unwrap().amount;
        let last = schedule.last().unwrap().amount;

        prop_assert!(first - last <= Decimal::new(1, 2));
        for pair in schedule.windows(2) {
            prop_assert!(pair[0].amount >= pair[1].amount);
        }
    }
}

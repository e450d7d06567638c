// Metrics aggregation over both plan representations, plus status
// derivation.

use nvjmios::plans::models::{Installment, InstallmentPlan, PlanStatus};
use nvjmios::plans::services::metrics::{compute_metrics, derive_status};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn itemized_plan(amounts: &[Decimal], paid_through: usize) -> InstallmentPlan {
    let mut plan = InstallmentPlan::new("user-1", "Shopee");
    plan.installments = amounts
        .iter()
        .enumerate()
        .map(|(i, amount)| {
            let mut inst = Installment::new(&plan.id, (i + 1) as i32, *amount);
            if i < paid_through {
                inst.mark_paid().unwrap();
            }
            inst
        })
        .collect();
    plan
}

#[test]
fn itemized_plan_metrics() {
    let plan = itemized_plan(&[dec!(3.34), dec!(3.33), dec!(3.33)], 1);
    let metrics = compute_metrics(&plan);

    assert_eq!(metrics.total, dec!(10.00));
    assert_eq!(metrics.total_installments, 3);
    assert_eq!(metrics.paid_installments, 1);
    assert_eq!(metrics.remaining_installments, 2);
    assert_eq!(metrics.remaining_balance, dec!(6.66));
    assert_eq!(metrics.next_installment_amount, Some(dec!(3.33)));
    assert_eq!(metrics.progress_percent, 33);
}

#[test]
fn legacy_plan_yields_same_shape() {
    let mut plan = InstallmentPlan::new("user-1", "Atome");
    plan.total_amount = Some(dec!(300.00));
    plan.installment_amount = Some(dec!(100.00));
    plan.installments_total = Some(3);
    plan.installments_paid = Some(1);

    let metrics = compute_metrics(&plan);

    assert_eq!(metrics.total, dec!(300.00));
    assert_eq!(metrics.total_installments, 3);
    assert_eq!(metrics.paid_installments, 1);
    assert_eq!(metrics.remaining_installments, 2);
    assert_eq!(metrics.remaining_balance, dec!(200.00));
    assert_eq!(metrics.next_installment_amount, Some(dec!(100.00)));
    assert_eq!(metrics.progress_percent, 33);
}

#[test]
fn itemized_schedule_wins_over_stale_flat_fields() {
    let mut plan = itemized_plan(&[dec!(50.00), dec!(50.00)], 0);
    // Stale display mirrors must not leak into the metrics
    plan.total_amount = Some(dec!(999.00));
    plan.installments_total = Some(7);
    plan.installments_paid = Some(5);

    let metrics = compute_metrics(&plan);
    assert_eq!(metrics.total, dec!(100.00));
    assert_eq!(metrics.total_installments, 2);
    assert_eq!(metrics.paid_installments, 0);
}

#[test]
fn missing_legacy_numerics_degrade_to_zero() {
    let plan = InstallmentPlan::new("user-1", "Grab");
    let metrics = compute_metrics(&plan);

    assert_eq!(metrics.total, Decimal::ZERO);
    assert_eq!(metrics.total_installments, 0);
    assert_eq!(metrics.paid_installments, 0);
    assert_eq!(metrics.remaining_installments, 0);
    assert_eq!(metrics.remaining_balance, Decimal::ZERO);
    assert_eq!(metrics.next_installment_amount, None);
    assert_eq!(metrics.progress_percent, 0);
}

#[test]
fn overpaid_legacy_record_clamps_to_zero_remaining() {
    let mut plan = InstallmentPlan::new("user-1", "Atome");
    plan.total_amount = Some(dec!(100.00));
    plan.installment_amount = Some(dec!(60.00));
    plan.installments_total = Some(2);
    plan.installments_paid = Some(3);

    let metrics = compute_metrics(&plan);
    assert_eq!(metrics.remaining_balance, Decimal::ZERO);
    assert_eq!(metrics.remaining_installments, 0);
    assert_eq!(metrics.progress_percent, 100);
}

#[test]
fn next_installment_follows_sequence_order() {
    // Middle installment paid: the next unpaid one is the first in
    // sequence order, not the cheapest or latest
    let mut plan = itemized_plan(&[dec!(10.00), dec!(20.00), dec!(30.00)], 0);
    plan.installments[1].mark_paid().unwrap();

    let metrics = compute_metrics(&plan);
    assert_eq!(metrics.next_installment_amount, Some(dec!(10.00)));
    assert_eq!(metrics.paid_installments, 1);
    assert_eq!(metrics.remaining_balance, dec!(40.00));
}

#[test]
fn all_paid_derives_completed_regardless_of_stored_status() {
    let plan = itemized_plan(&[dec!(50.00), dec!(50.00)], 2);
    let metrics = compute_metrics(&plan);

    assert_eq!(derive_status(&metrics, PlanStatus::Active), PlanStatus::Completed);
    assert_eq!(derive_status(&metrics, PlanStatus::Overdue), PlanStatus::Completed);
    assert_eq!(derive_status(&metrics, PlanStatus::Completed), PlanStatus::Completed);
}

#[test]
fn zero_installment_plan_never_derives_completed() {
    let plan = InstallmentPlan::new("user-1", "Grab");
    let metrics = compute_metrics(&plan);
    assert_eq!(derive_status(&metrics, PlanStatus::Active), PlanStatus::Active);
}

#[test]
fn stale_completed_reverts_to_active() {
    let plan = itemized_plan(&[dec!(50.00), dec!(50.00)], 1);
    let metrics = compute_metrics(&plan);
    assert_eq!(derive_status(&metrics, PlanStatus::Completed), PlanStatus::Active);
}

#[test]
fn progress_rounds_to_nearest_integer() {
    let one_of_three = itemized_plan(&[dec!(1), dec!(1), dec!(1)], 1);
    assert_eq!(compute_metrics(&one_of_three).progress_percent, 33);

    let two_of_three = itemized_plan(&[dec!(1), dec!(1), dec!(1)], 2);
    assert_eq!(compute_metrics(&two_of_three).progress_percent, 67);

    let one_of_six = itemized_plan(&[dec!(1); 6], 1);
    assert_eq!(compute_metrics(&one_of_six).progress_percent, 17);
}

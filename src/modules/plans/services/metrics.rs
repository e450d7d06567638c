use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::modules::plans::models::{Installment, InstallmentPlan, PlanStatus};

/// Derived payment-progress view of a plan
///
/// Recomputed on every read, never persisted. The shape is identical
/// whether the plan carries an itemized schedule or only the legacy flat
/// fields, so downstream consumers never branch on plan representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanMetrics {
    pub total: Decimal,
    pub total_installments: i32,
    pub paid_installments: i32,
    pub remaining_installments: i32,
    /// Outstanding balance still to be paid
    pub remaining_balance: Decimal,
    pub next_installment_amount: Option<Decimal>,
    pub next_due_date: Option<NaiveDate>,
    /// 0-100, rounded to the nearest integer
    pub progress_percent: i32,
}

/// Normalised view over the plan's dual representation
enum ScheduleView<'a> {
    Itemized(&'a [Installment]),
    Legacy {
        total: Decimal,
        per_installment: Decimal,
        count: i32,
        paid: i32,
    },
}

impl<'a> ScheduleView<'a> {
    /// Missing/null legacy numerics degrade to zero so a partially
    /// populated record still renders a sane metrics view.
    fn of(plan: &'a InstallmentPlan) -> Self {
        if plan.has_schedule() {
            ScheduleView::Itemized(&plan.installments)
        } else {
            ScheduleView::Legacy {
                total: plan.total_amount.unwrap_or_default(),
                per_installment: plan.installment_amount.unwrap_or_default(),
                count: plan.installments_total.unwrap_or(0),
                paid: plan.installments_paid.unwrap_or(0),
            }
        }
    }
}

/// Compute the metrics view for a plan
pub fn compute_metrics(plan: &InstallmentPlan) -> PlanMetrics {
    match ScheduleView::of(plan) {
        ScheduleView::Itemized(installments) => {
            let total: Decimal = installments.iter().map(|i| i.amount).sum();
            let total_installments = installments.len() as i32;
            let paid_installments = installments.iter().filter(|i| i.is_paid).count() as i32;
            let remaining_installments = total_installments - paid_installments;
            let remaining_balance: Decimal = installments
                .iter()
                .filter(|i| !i.is_paid)
                .map(|i| i.amount)
                .sum();
            let next_unpaid = installments.iter().find(|i| !i.is_paid);

            PlanMetrics {
                total,
                total_installments,
                paid_installments,
                remaining_installments,
                remaining_balance,
                next_installment_amount: next_unpaid.map(|i| i.amount),
                next_due_date: next_unpaid
                    .and_then(|i| i.due_date)
                    .or(plan.next_due_date),
                progress_percent: progress_percent(paid_installments, total_installments),
            }
        }
        ScheduleView::Legacy {
            total,
            per_installment,
            count,
            paid,
        } => {
            let remaining_installments = (count - paid).max(0);
            let remaining_balance =
                (total - per_installment * Decimal::from(paid)).max(Decimal::ZERO);

            PlanMetrics {
                total,
                total_installments: count,
                paid_installments: paid,
                remaining_installments,
                remaining_balance,
                next_installment_amount: (remaining_installments > 0).then_some(per_installment),
                next_due_date: plan.next_due_date,
                progress_percent: progress_percent(paid, count),
            }
        }
    }
}

/// Derive the plan status after a metrics recomputation
///
/// All installments paid (and at least one exists) forces Completed,
/// overriding whatever was stored. The reverse also holds: a stored
/// Completed with unpaid installments reverts to Active.
pub fn derive_status(metrics: &PlanMetrics, stored: PlanStatus) -> PlanStatus {
    if metrics.total_installments > 0 && metrics.paid_installments >= metrics.total_installments {
        PlanStatus::Completed
    } else if stored == PlanStatus::Completed {
        PlanStatus::Active
    } else {
        stored
    }
}

/// Integer percentage, rounded half-up and clamped to [0, 100]
fn progress_percent(paid: i32, total: i32) -> i32 {
    if total <= 0 {
        return 0;
    }
    let paid = i64::from(paid.max(0));
    let total = i64::from(total);
    let rounded = (200 * paid + total) / (2 * total);
    rounded.clamp(0, 100) as i32
}

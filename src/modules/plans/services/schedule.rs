use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::core::dates::add_months;
use crate::core::money::{drift_warning, from_cents, to_cents};
use crate::core::{AppError, Result};
use crate::modules::plans::models::Installment;

/// Generate an even installment schedule for a plan
///
/// Works in integer minor units so the amounts always sum to `total`
/// exactly. With `base = total_cents / count`, the first
/// `total_cents - base * count` installments carry one extra cent, so
/// odd cents land on the earliest installments deterministically.
///
/// A non-positive total or count yields an empty schedule: callers treat
/// that as "not yet configured", not as an error.
pub fn generate_schedule(plan_id: &str, total: Decimal, count: i32) -> Vec<Installment> {
    let total_cents = to_cents(total);
    if total_cents <= 0 || count <= 0 {
        return Vec::new();
    }

    let count_wide = i64::from(count);
    let base = total_cents / count_wide;
    let remainder = total_cents - base * count_wide;

    (1..=count)
        .map(|sequence| {
            let extra = if i64::from(sequence) <= remainder { 1 } else { 0 };
            Installment::new(plan_id, sequence, from_cents(base + extra))
        })
        .collect()
}

/// Assign monthly due dates starting from the first installment's due date
pub fn assign_monthly_due_dates(installments: &mut [Installment], first_due: NaiveDate) {
    for (i, installment) in installments.iter_mut().enumerate() {
        installment.due_date = add_months(first_due, i as u32);
    }
}

/// Whether the user has hand-edited amounts in the current edit session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Clean,
    Dirty,
}

/// In-progress edit session over a plan's schedule
///
/// Tracks the working installment list together with an explicit
/// clean/dirty state: shape changes (total or count) regenerate the
/// schedule only while the session is clean, so hand-edited amounts are
/// never silently discarded. An explicit [`redistribute`](Self::redistribute)
/// always resets to an even split.
#[derive(Debug, Clone)]
pub struct ScheduleDraft {
    plan_id: String,
    installments: Vec<Installment>,
    edit_state: EditState,
}

impl ScheduleDraft {
    /// Start an empty session for a new plan
    pub fn new(plan_id: impl Into<String>) -> Self {
        Self {
            plan_id: plan_id.into(),
            installments: Vec::new(),
            edit_state: EditState::Clean,
        }
    }

    /// Start a session over an existing schedule
    pub fn from_existing(plan_id: impl Into<String>, installments: Vec<Installment>) -> Self {
        Self {
            plan_id: plan_id.into(),
            installments,
            edit_state: EditState::Clean,
        }
    }

    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    pub fn into_installments(self) -> Vec<Installment> {
        self.installments
    }

    pub fn is_dirty(&self) -> bool {
        self.edit_state == EditState::Dirty
    }

    /// Resume a session whose amounts were already hand-edited elsewhere
    /// (the dirty flag travels with the edit session, not the storage)
    pub fn mark_dirty(&mut self) {
        self.edit_state = EditState::Dirty;
    }

    /// React to a total/count change
    ///
    /// While the session is clean this regenerates the schedule,
    /// carrying paid state and due dates over by sequence position. Once
    /// the user has hand-edited an amount the change is ignored until an
    /// explicit redistribute. Returns whether the schedule was rebuilt.
    pub fn apply_shape_change(&mut self, total: Decimal, count: i32) -> bool {
        if self.edit_state == EditState::Dirty {
            info!(
                plan_id = self.plan_id.as_str(),
                "Shape change ignored: schedule has manual edits"
            );
            return false;
        }

        self.regenerate(total, count);
        true
    }

    /// Regenerate an even split unconditionally and clear the dirty flag
    pub fn redistribute(&mut self, total: Decimal, count: i32) {
        self.regenerate(total, count);
        self.edit_state = EditState::Clean;
    }

    /// Hand-edit one installment's amount, marking the session dirty
    pub fn edit_amount(&mut self, sequence: i32, amount: Decimal) -> Result<()> {
        let installment = self
            .installments
            .iter_mut()
            .find(|i| i.sequence == sequence)
            .ok_or_else(|| {
                AppError::validation(format!("No installment with sequence {}", sequence))
            })?;

        installment.amount = amount;
        installment.updated_at = chrono::Utc::now().naive_utc();
        self.edit_state = EditState::Dirty;
        Ok(())
    }

    /// Toggle an installment's paid state without touching amounts
    pub fn set_paid(&mut self, sequence: i32, paid: bool) -> Result<()> {
        let installment = self
            .installments
            .iter_mut()
            .find(|i| i.sequence == sequence)
            .ok_or_else(|| {
                AppError::validation(format!("No installment with sequence {}", sequence))
            })?;

        if paid {
            installment.mark_paid()
        } else {
            installment.mark_unpaid()
        }
    }

    /// Difference between the working amounts and the stated total, when
    /// it exceeds the cent-level tolerance
    ///
    /// Surfaced as a non-blocking warning; saving stays possible.
    pub fn drift_from(&self, stated_total: Decimal) -> Option<Decimal> {
        let sum: Decimal = self.installments.iter().map(|i| i.amount).sum();
        drift_warning(sum, stated_total)
    }

    fn regenerate(&mut self, total: Decimal, count: i32) {
        let mut fresh = generate_schedule(&self.plan_id, total, count);

        // Carry paid state and due dates over by sequence position.
        // Positions beyond the new count are simply dropped.
        let dropped_paid = self
            .installments
            .iter()
            .filter(|old| old.is_paid && old.sequence > count)
            .count();
        if dropped_paid > 0 {
            warn!(
                plan_id = self.plan_id.as_str(),
                dropped_paid, "Count reduction drops paid installment positions"
            );
        }

        for installment in &mut fresh {
            if let Some(old) = self
                .installments
                .iter()
                .find(|i| i.sequence == installment.sequence)
            {
                installment.is_paid = old.is_paid;
                installment.paid_at = old.paid_at;
                installment.due_date = old.due_date;
            }
        }

        self.installments = fresh;
    }
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::plans::models::{Installment, InstallmentPlan};
use crate::modules::plans::repositories::PlanStore;
use crate::modules::plans::services::due_state::{DueState, Tone};
use crate::modules::plans::services::metrics::{compute_metrics, derive_status, PlanMetrics};
use crate::modules::plans::services::schedule::{
    assign_monthly_due_dates, generate_schedule, ScheduleDraft,
};

/// Input for creating a plan
///
/// Either an even split (`total` + `installment_count`) or an explicit
/// amount list; `custom_amounts` wins when both are present.
#[derive(Debug, Clone)]
pub struct NewPlan {
    pub user_id: String,
    pub merchant: String,
    pub item_name: Option<String>,
    pub account_id: Option<String>,
    pub notes: Option<String>,
    pub total: Decimal,
    pub installment_count: i32,
    pub first_due_date: Option<NaiveDate>,
    pub custom_amounts: Option<Vec<Decimal>>,
}

/// A plan together with its computed view-models
#[derive(Debug, Clone, Serialize)]
pub struct PlanSummary {
    pub plan: InstallmentPlan,
    pub metrics: PlanMetrics,
    pub due_state: DueState,
    pub due_label: String,
    pub due_tone: Tone,
}

/// Result of a schedule-mutating save
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleSaveOutcome {
    pub plan: InstallmentPlan,
    /// Whether the installment batch was regenerated
    pub regenerated: bool,
    /// Signed drift between installment sum and stated total, when it
    /// exceeds tolerance. A warning for the user, never a save blocker.
    pub drift_warning: Option<Decimal>,
}

/// Business logic for BNPL plans over a [`PlanStore`]
pub struct PlanService<S: PlanStore> {
    store: S,
}

impl<S: PlanStore> PlanService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a plan with a generated or explicit schedule
    ///
    /// A non-positive total/count yields a plan with an empty schedule
    /// ("not yet configured"), not an error.
    pub async fn create_plan(&self, input: NewPlan) -> Result<InstallmentPlan> {
        let mut plan = InstallmentPlan::new(input.user_id, input.merchant);
        plan.item_name = input.item_name;
        plan.account_id = input.account_id;
        plan.notes = input.notes;

        let mut schedule = match input.custom_amounts {
            Some(amounts) => amounts
                .into_iter()
                .enumerate()
                .map(|(i, amount)| Installment::new(&plan.id, (i + 1) as i32, amount))
                .collect(),
            None => generate_schedule(&plan.id, input.total, input.installment_count),
        };

        if let Some(first_due) = input.first_due_date {
            assign_monthly_due_dates(&mut schedule, first_due);
        }

        plan.installments = schedule;
        sync_derived_fields(&mut plan);

        info!(
            plan_id = plan.id.as_str(),
            merchant = plan.merchant.as_str(),
            installments = plan.installments.len(),
            "Creating installment plan"
        );

        self.store.insert_plan(&plan).await?;
        Ok(plan)
    }

    pub async fn get_plan(&self, id: &str) -> Result<InstallmentPlan> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Plan not found"))
    }

    /// Summaries for every plan the owner has, computed as of `today`
    pub async fn list_summaries(&self, user_id: &str, today: NaiveDate) -> Result<Vec<PlanSummary>> {
        let plans = self.store.find_by_owner(user_id).await?;
        Ok(plans.into_iter().map(|p| summarize(p, today)).collect())
    }

    /// Mark an installment paid or unpaid and persist the derived status
    pub async fn set_installment_paid(
        &self,
        plan_id: &str,
        sequence: i32,
        paid: bool,
        today: NaiveDate,
    ) -> Result<PlanSummary> {
        let mut plan = self.get_plan(plan_id).await?;

        let installment = plan
            .installments
            .iter_mut()
            .find(|i| i.sequence == sequence)
            .ok_or_else(|| {
                AppError::validation(format!("No installment with sequence {}", sequence))
            })?;

        if paid {
            installment.mark_paid()?;
        } else {
            installment.mark_unpaid()?;
        }
        let updated = installment.clone();

        sync_derived_fields(&mut plan);

        self.store.update_installment(&updated).await?;
        self.store.update_plan(&plan).await?;

        info!(
            plan_id = plan_id,
            sequence,
            paid,
            status = %plan.status,
            "Installment paid state updated"
        );

        Ok(summarize(plan, today))
    }

    /// React to a total/count change from the edit form
    ///
    /// Regenerates the schedule only when the session has no manual
    /// amount edits; a dirty session leaves the batch untouched and the
    /// caller offers an explicit redistribute instead.
    pub async fn apply_shape_change(
        &self,
        plan_id: &str,
        total: Decimal,
        count: i32,
        session_dirty: bool,
    ) -> Result<ScheduleSaveOutcome> {
        let mut plan = self.get_plan(plan_id).await?;

        let mut draft = ScheduleDraft::from_existing(&plan.id, plan.installments.clone());
        if session_dirty {
            draft.mark_dirty();
        }

        let regenerated = draft.apply_shape_change(total, count);
        let drift = draft.drift_from(total);

        if regenerated {
            plan.installments = draft.into_installments();
            sync_derived_fields(&mut plan);
            self.store.replace_schedule(&plan.id, &plan.installments).await?;
            self.store.update_plan(&plan).await?;
        }

        if let Some(drift) = drift {
            warn!(plan_id, %drift, "Schedule sum drifts from stated total");
        }

        Ok(ScheduleSaveOutcome {
            plan,
            regenerated,
            drift_warning: drift,
        })
    }

    /// Explicit "redistribute" action: reset to an even split
    pub async fn redistribute_schedule(
        &self,
        plan_id: &str,
        total: Decimal,
        count: i32,
    ) -> Result<ScheduleSaveOutcome> {
        let mut plan = self.get_plan(plan_id).await?;

        let mut draft = ScheduleDraft::from_existing(&plan.id, plan.installments.clone());
        draft.redistribute(total, count);

        plan.installments = draft.into_installments();
        sync_derived_fields(&mut plan);
        self.store.replace_schedule(&plan.id, &plan.installments).await?;
        self.store.update_plan(&plan).await?;

        info!(plan_id, count, "Schedule redistributed");

        Ok(ScheduleSaveOutcome {
            plan,
            regenerated: true,
            drift_warning: None,
        })
    }

    /// Hand-edit a single installment amount
    ///
    /// The stated total is left alone; when the edited sum drifts from
    /// it by more than the tolerance the outcome carries a warning.
    pub async fn edit_installment_amount(
        &self,
        plan_id: &str,
        sequence: i32,
        amount: Decimal,
    ) -> Result<ScheduleSaveOutcome> {
        let mut plan = self.get_plan(plan_id).await?;
        let stated_total = plan.total_amount.unwrap_or_default();

        let mut draft = ScheduleDraft::from_existing(&plan.id, plan.installments.clone());
        draft.edit_amount(sequence, amount)?;
        let drift = draft.drift_from(stated_total);

        plan.installments = draft.into_installments();
        let updated = plan
            .installments
            .iter()
            .find(|i| i.sequence == sequence)
            .cloned()
            .ok_or_else(|| AppError::internal("Edited installment vanished"))?;

        // Stated total is untouched: the schedule is the source of truth
        // and the drift warning tells the user about the mismatch.
        plan.status = derive_status(&compute_metrics(&plan), plan.status);
        plan.next_due_date = plan.effective_next_due_date();
        plan.updated_at = chrono::Utc::now().naive_utc();

        self.store.update_installment(&updated).await?;
        self.store.update_plan(&plan).await?;

        if let Some(drift) = drift {
            warn!(plan_id, %drift, "Schedule sum drifts from stated total");
        }

        Ok(ScheduleSaveOutcome {
            plan,
            regenerated: false,
            drift_warning: drift,
        })
    }
}

/// Build the summary view-model for one plan
pub fn summarize(plan: InstallmentPlan, today: NaiveDate) -> PlanSummary {
    let metrics = compute_metrics(&plan);
    let due_state = DueState::classify(plan.status, metrics.next_due_date, today);

    PlanSummary {
        due_label: due_state.label(),
        due_tone: due_state.tone(),
        due_state,
        metrics,
        plan,
    }
}

/// Refresh the fields derived from the schedule: status, next due date
/// and the legacy display mirrors
fn sync_derived_fields(plan: &mut InstallmentPlan) {
    let metrics = compute_metrics(plan);
    plan.status = derive_status(&metrics, plan.status);

    if plan.has_schedule() {
        plan.next_due_date = plan.effective_next_due_date();
        plan.total_amount = Some(metrics.total);
        plan.installment_amount = plan.installments.first().map(|i| i.amount);
        plan.installments_total = Some(metrics.total_installments);
        plan.installments_paid = Some(metrics.paid_installments);
    }

    plan.updated_at = chrono::Utc::now().naive_utc();
}

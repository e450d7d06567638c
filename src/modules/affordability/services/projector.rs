use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::modules::accounts::models::Account;
use crate::modules::cards::models::{CardStatement, StatementStatus};
use crate::modules::plans::models::{InstallmentPlan, PlanStatus};
use crate::modules::plans::services::due_state::Tone;
use crate::modules::plans::services::metrics::compute_metrics;

/// Tier thresholds for the "Available to Spend" figure
///
/// Presentation policy, not a hard financial limit: the caution/healthy
/// boundary is configurable, default RM 500.
#[derive(Debug, Clone)]
pub struct AffordabilityPolicy {
    pub caution_threshold: Decimal,
}

impl Default for AffordabilityPolicy {
    fn default() -> Self {
        Self {
            caution_threshold: Decimal::new(500, 0),
        }
    }
}

/// Urgency tier of the projected figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendTier {
    Critical,
    Caution,
    Healthy,
}

impl SpendTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Caution => "caution",
            Self::Healthy => "healthy",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::Critical => Tone::Error,
            Self::Caution => Tone::Warning,
            Self::Healthy => Tone::Success,
        }
    }
}

/// Projected spendable liquidity before the next income event
#[derive(Debug, Clone, Serialize)]
pub struct AvailableToSpend {
    pub liquid: Decimal,
    pub due_before_payday: Decimal,
    pub available: Decimal,
    pub tier: SpendTier,
    pub next_payday: NaiveDate,
}

/// Project "Available to Spend" as of `today`
///
/// Liquid balances minus every obligation falling due in the inclusive
/// `[today, next_payday]` window: the next installment of each
/// non-completed BNPL plan plus the minimum payment of each pending
/// card statement.
pub fn project_available_to_spend(
    accounts: &[Account],
    plans: &[InstallmentPlan],
    statements: &[CardStatement],
    today: NaiveDate,
    next_payday: NaiveDate,
    policy: &AffordabilityPolicy,
) -> AvailableToSpend {
    let liquid: Decimal = accounts
        .iter()
        .filter(|a| a.is_liquid())
        .map(|a| a.balance)
        .sum();

    let in_window = |due: NaiveDate| due >= today && due <= next_payday;

    let plan_dues: Decimal = plans
        .iter()
        .filter(|p| p.status != PlanStatus::Completed)
        .filter_map(|p| {
            let metrics = compute_metrics(p);
            match (metrics.next_installment_amount, metrics.next_due_date) {
                (Some(amount), Some(due)) if in_window(due) => Some(amount),
                _ => None,
            }
        })
        .sum();

    let card_dues: Decimal = statements
        .iter()
        .filter(|s| s.status == StatementStatus::Pending && in_window(s.due_date))
        .map(|s| s.minimum_payment)
        .sum();

    let due_before_payday = plan_dues + card_dues;
    let available = liquid - due_before_payday;

    let tier = if available < Decimal::ZERO {
        SpendTier::Critical
    } else if available < policy.caution_threshold {
        SpendTier::Caution
    } else {
        SpendTier::Healthy
    };

    AvailableToSpend {
        liquid,
        due_before_payday,
        available,
        tier,
        next_payday,
    }
}

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Installment;

/// A Buy-Now-Pay-Later installment plan
///
/// Carries either an itemized schedule (`installments`) or, for plans
/// created before itemization existed, the legacy flat fields
/// (`total_amount`, `installment_amount`, `installments_total`,
/// `installments_paid`). Once a schedule exists the flat fields are
/// display-only derived values, never the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentPlan {
    pub id: String,
    pub user_id: String,
    /// Funding/provider account, when linked
    pub account_id: Option<String>,
    pub merchant: String,
    pub item_name: Option<String>,
    pub status: PlanStatus,
    pub notes: Option<String>,
    /// May be stored explicitly or inferred from the schedule
    pub next_due_date: Option<NaiveDate>,
    // Legacy flat fields, used only when no itemized schedule exists
    pub total_amount: Option<Decimal>,
    pub installment_amount: Option<Decimal>,
    pub installments_total: Option<i32>,
    pub installments_paid: Option<i32>,
    /// Itemized schedule, ordered by sequence
    #[serde(default)]
    pub installments: Vec<Installment>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Plan lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Installments remain and none require attention
    Active,
    /// Flagged overdue (manually or by background correction)
    Overdue,
    /// Every installment is paid
    Completed,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Overdue => "overdue",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for PlanStatus {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "active" => Ok(Self::Active),
            "overdue" => Ok(Self::Overdue),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("Invalid plan status: {}", value)),
        }
    }
}

impl InstallmentPlan {
    pub fn new(user_id: impl Into<String>, merchant: impl Into<String>) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            account_id: None,
            merchant: merchant.into(),
            item_name: None,
            status: PlanStatus::Active,
            notes: None,
            next_due_date: None,
            total_amount: None,
            installment_amount: None,
            installments_total: None,
            installments_paid: None,
            installments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether an itemized schedule exists for this plan
    pub fn has_schedule(&self) -> bool {
        !self.installments.is_empty()
    }

    /// First unpaid installment in sequence order
    pub fn first_unpaid(&self) -> Option<&Installment> {
        self.installments.iter().find(|i| !i.is_paid)
    }

    /// Due date the plan should surface next: the first unpaid
    /// installment's due date when a schedule exists, otherwise the
    /// stored `next_due_date`
    pub fn effective_next_due_date(&self) -> Option<NaiveDate> {
        if self.has_schedule() {
            self.first_unpaid().and_then(|i| i.due_date)
        } else {
            self.next_due_date
        }
    }
}

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};

/// One scheduled partial payment within a BNPL plan
///
/// Sequence numbers are 1-based and contiguous within a plan; the batch
/// they belong to is only ever replaced as a whole, never partially.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Installment {
    pub id: String,
    pub plan_id: String,
    /// 1-based position within the plan's schedule
    pub sequence: i32,
    pub amount: Decimal,
    pub is_paid: bool,
    pub due_date: Option<NaiveDate>,
    /// Set when `is_paid` transitions to true
    pub paid_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Installment {
    pub fn new(plan_id: impl Into<String>, sequence: i32, amount: Decimal) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4().to_string(),
            plan_id: plan_id.into(),
            sequence,
            amount,
            is_paid: false,
            due_date: None,
            paid_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark this installment as paid, stamping `paid_at`
    pub fn mark_paid(&mut self) -> Result<()> {
        if self.is_paid {
            return Err(AppError::validation(format!(
                "Installment {} is already paid",
                self.sequence
            )));
        }

        self.is_paid = true;
        self.paid_at = Some(chrono::Utc::now().naive_utc());
        self.updated_at = chrono::Utc::now().naive_utc();

        Ok(())
    }

    /// Revert a paid installment back to unpaid, clearing `paid_at`
    pub fn mark_unpaid(&mut self) -> Result<()> {
        if !self.is_paid {
            return Err(AppError::validation(format!(
                "Installment {} is not paid",
                self.sequence
            )));
        }

        self.is_paid = false;
        self.paid_at = None;
        self.updated_at = chrono::Utc::now().naive_utc();

        Ok(())
    }

    /// Whether this installment is unpaid and past its due date
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        if self.is_paid {
            return false;
        }
        matches!(self.due_date, Some(due) if due < today)
    }
}

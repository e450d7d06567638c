use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A credit-card statement cycle with its minimum payment obligation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardStatement {
    pub id: String,
    pub user_id: String,
    pub card_name: String,
    pub statement_balance: Decimal,
    pub minimum_payment: Decimal,
    pub due_date: NaiveDate,
    pub status: StatementStatus,
}

/// Statement payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementStatus {
    Pending,
    Paid,
}

impl StatementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for StatementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for StatementStatus {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            _ => Err(format!("Invalid statement status: {}", value)),
        }
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A money account tracked on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub kind: AccountKind,
    pub balance: Decimal,
}

/// Account classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Savings,
    Checking,
    Ewallet,
    CreditCard,
    Loan,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Savings => "savings",
            Self::Checking => "checking",
            Self::Ewallet => "ewallet",
            Self::CreditCard => "credit_card",
            Self::Loan => "loan",
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for AccountKind {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "savings" => Ok(Self::Savings),
            "checking" => Ok(Self::Checking),
            "ewallet" => Ok(Self::Ewallet),
            "credit_card" => Ok(Self::CreditCard),
            "loan" => Ok(Self::Loan),
            _ => Err(format!("Invalid account kind: {}", value)),
        }
    }
}

impl Account {
    /// Whether the balance counts as spendable liquidity
    ///
    /// Credit lines and loans hold debt, not cash, so only deposit-style
    /// accounts feed the affordability projection.
    pub fn is_liquid(&self) -> bool {
        matches!(
            self.kind,
            AccountKind::Savings | AccountKind::Checking | AccountKind::Ewallet
        )
    }
}

use sqlx::PgPool;

use crate::core::{AppError, Result};
use crate::modules::accounts::models::{Account, AccountKind};

/// Read access to account balances
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All accounts for an owner
    pub async fn list_by_owner(&self, user_id: &str) -> Result<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, user_id, name, kind, balance
            FROM accounts
            WHERE user_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch accounts: {}", e)))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: String,
    user_id: String,
    name: String,
    kind: String,
    balance: rust_decimal::Decimal,
}

impl TryFrom<AccountRow> for Account {
    type Error = AppError;

    fn try_from(row: AccountRow) -> Result<Self> {
        let kind = AccountKind::try_from(row.kind).map_err(AppError::Internal)?;

        Ok(Account {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            kind,
            balance: row.balance,
        })
    }
}

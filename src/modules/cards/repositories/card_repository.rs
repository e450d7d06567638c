use sqlx::PgPool;

use crate::core::{AppError, Result};
use crate::modules::cards::models::{CardStatement, StatementStatus};

/// Read access to credit-card statements
pub struct CardRepository {
    pool: PgPool,
}

impl CardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Unpaid statements for an owner, soonest due first
    pub async fn find_pending_by_owner(&self, user_id: &str) -> Result<Vec<CardStatement>> {
        let rows = sqlx::query_as::<_, CardStatementRow>(
            r#"
            SELECT id, user_id, card_name, statement_balance,
                   minimum_payment, due_date, status
            FROM card_statements
            WHERE user_id = $1 AND status = 'pending'
            ORDER BY due_date ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch card statements: {}", e)))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

#[derive(sqlx::FromRow)]
struct CardStatementRow {
    id: String,
    user_id: String,
    card_name: String,
    statement_balance: rust_decimal::Decimal,
    minimum_payment: rust_decimal::Decimal,
    due_date: chrono::NaiveDate,
    status: String,
}

impl TryFrom<CardStatementRow> for CardStatement {
    type Error = AppError;

    fn try_from(row: CardStatementRow) -> Result<Self> {
        let status = StatementStatus::try_from(row.status).map_err(AppError::Internal)?;

        Ok(CardStatement {
            id: row.id,
            user_id: row.user_id,
            card_name: row.card_name,
            statement_balance: row.statement_balance,
            minimum_payment: row.minimum_payment,
            due_date: row.due_date,
            status,
        })
    }
}

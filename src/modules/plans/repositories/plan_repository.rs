use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::core::{AppError, Result};
use crate::modules::plans::models::{Installment, InstallmentPlan, PlanStatus};

/// Persistence seam for BNPL plans
///
/// The engine only ever needs these operations from its storage layer;
/// everything above this trait is pure computation over the returned
/// data. Schedule replacement is atomic: either the full old batch is
/// replaced by the full new batch, or neither happens.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Fetch a plan with its ordered installment list
    async fn find_by_id(&self, id: &str) -> Result<Option<InstallmentPlan>>;

    /// Fetch all plans for an owner, installments attached and ordered
    async fn find_by_owner(&self, user_id: &str) -> Result<Vec<InstallmentPlan>>;

    /// Insert a new plan together with its schedule
    async fn insert_plan(&self, plan: &InstallmentPlan) -> Result<()>;

    /// Update a plan's scalar fields (merchant, status, totals, notes...)
    async fn update_plan(&self, plan: &InstallmentPlan) -> Result<()>;

    /// Replace a plan's installment batch in a single transaction
    async fn replace_schedule(&self, plan_id: &str, installments: &[Installment]) -> Result<()>;

    /// Update a single installment's amount/paid state
    async fn update_installment(&self, installment: &Installment) -> Result<()>;
}

/// PostgreSQL implementation of [`PlanStore`]
pub struct PlanRepository {
    pool: PgPool,
}

impl PlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn installments_for(&self, plan_id: &str) -> Result<Vec<Installment>> {
        let rows = sqlx::query_as::<_, InstallmentRow>(
            r#"
            SELECT id, plan_id, sequence, amount, is_paid, due_date,
                   paid_at, created_at, updated_at
            FROM installments
            WHERE plan_id = $1
            ORDER BY sequence ASC
            "#,
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch installments: {}", e)))?;

        Ok(rows.into_iter().map(Installment::from).collect())
    }

    async fn insert_installment_with_tx(
        tx: &mut Transaction<'_, Postgres>,
        installment: &Installment,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO installments (
                id, plan_id, sequence, amount, is_paid, due_date,
                paid_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&installment.id)
        .bind(&installment.plan_id)
        .bind(installment.sequence)
        .bind(installment.amount)
        .bind(installment.is_paid)
        .bind(installment.due_date)
        .bind(installment.paid_at)
        .bind(installment.created_at)
        .bind(installment.updated_at)
        .execute(tx.as_mut())
        .await
        .map_err(|e| AppError::Internal(format!("Failed to insert installment: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl PlanStore for PlanRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<InstallmentPlan>> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, user_id, account_id, merchant, item_name, status, notes,
                   next_due_date, total_amount, installment_amount,
                   installments_total, installments_paid, created_at, updated_at
            FROM installment_plans
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch plan: {}", e)))?;

        match row {
            Some(row) => {
                let mut plan: InstallmentPlan = row.try_into()?;
                plan.installments = self.installments_for(&plan.id).await?;
                Ok(Some(plan))
            }
            None => Ok(None),
        }
    }

    async fn find_by_owner(&self, user_id: &str) -> Result<Vec<InstallmentPlan>> {
        let rows = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, user_id, account_id, merchant, item_name, status, notes,
                   next_due_date, total_amount, installment_amount,
                   installments_total, installments_paid, created_at, updated_at
            FROM installment_plans
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch plans: {}", e)))?;

        let mut plans = Vec::with_capacity(rows.len());
        for row in rows {
            let mut plan: InstallmentPlan = row.try_into()?;
            plan.installments = self.installments_for(&plan.id).await?;
            plans.push(plan);
        }

        Ok(plans)
    }

    async fn insert_plan(&self, plan: &InstallmentPlan) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO installment_plans (
                id, user_id, account_id, merchant, item_name, status, notes,
                next_due_date, total_amount, installment_amount,
                installments_total, installments_paid, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(&plan.id)
        .bind(&plan.user_id)
        .bind(&plan.account_id)
        .bind(&plan.merchant)
        .bind(&plan.item_name)
        .bind(plan.status.to_string())
        .bind(&plan.notes)
        .bind(plan.next_due_date)
        .bind(plan.total_amount)
        .bind(plan.installment_amount)
        .bind(plan.installments_total)
        .bind(plan.installments_paid)
        .bind(plan.created_at)
        .bind(plan.updated_at)
        .execute(tx.as_mut())
        .await
        .map_err(|e| AppError::Internal(format!("Failed to insert plan: {}", e)))?;

        for installment in &plan.installments {
            Self::insert_installment_with_tx(&mut tx, installment).await?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn update_plan(&self, plan: &InstallmentPlan) -> Result<()> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE installment_plans
            SET account_id = $1,
                merchant = $2,
                item_name = $3,
                status = $4,
                notes = $5,
                next_due_date = $6,
                total_amount = $7,
                installment_amount = $8,
                installments_total = $9,
                installments_paid = $10,
                updated_at = $11
            WHERE id = $12
            "#,
        )
        .bind(&plan.account_id)
        .bind(&plan.merchant)
        .bind(&plan.item_name)
        .bind(plan.status.to_string())
        .bind(&plan.notes)
        .bind(plan.next_due_date)
        .bind(plan.total_amount)
        .bind(plan.installment_amount)
        .bind(plan.installments_total)
        .bind(plan.installments_paid)
        .bind(plan.updated_at)
        .bind(&plan.id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update plan: {}", e)))?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::not_found("Plan not found"));
        }

        Ok(())
    }

    async fn replace_schedule(&self, plan_id: &str, installments: &[Installment]) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        sqlx::query("DELETE FROM installments WHERE plan_id = $1")
            .bind(plan_id)
            .execute(tx.as_mut())
            .await
            .map_err(|e| AppError::Internal(format!("Failed to clear schedule: {}", e)))?;

        for installment in installments {
            Self::insert_installment_with_tx(&mut tx, installment).await?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn update_installment(&self, installment: &Installment) -> Result<()> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE installments
            SET amount = $1,
                is_paid = $2,
                due_date = $3,
                paid_at = $4,
                updated_at = $5
            WHERE id = $6
            "#,
        )
        .bind(installment.amount)
        .bind(installment.is_paid)
        .bind(installment.due_date)
        .bind(installment.paid_at)
        .bind(installment.updated_at)
        .bind(&installment.id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update installment: {}", e)))?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::not_found("Installment not found"));
        }

        Ok(())
    }
}

/// Database row for the installment_plans table
#[derive(sqlx::FromRow)]
struct PlanRow {
    id: String,
    user_id: String,
    account_id: Option<String>,
    merchant: String,
    item_name: Option<String>,
    status: String,
    notes: Option<String>,
    next_due_date: Option<chrono::NaiveDate>,
    total_amount: Option<rust_decimal::Decimal>,
    installment_amount: Option<rust_decimal::Decimal>,
    installments_total: Option<i32>,
    installments_paid: Option<i32>,
    created_at: chrono::NaiveDateTime,
    updated_at: chrono::NaiveDateTime,
}

impl TryFrom<PlanRow> for InstallmentPlan {
    type Error = AppError;

    fn try_from(row: PlanRow) -> Result<Self> {
        let status = PlanStatus::try_from(row.status).map_err(AppError::Internal)?;

        Ok(InstallmentPlan {
            id: row.id,
            user_id: row.user_id,
            account_id: row.account_id,
            merchant: row.merchant,
            item_name: row.item_name,
            status,
            notes: row.notes,
            next_due_date: row.next_due_date,
            total_amount: row.total_amount,
            installment_amount: row.installment_amount,
            installments_total: row.installments_total,
            installments_paid: row.installments_paid,
            installments: Vec::new(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Database row for the installments table
#[derive(sqlx::FromRow)]
struct InstallmentRow {
    id: String,
    plan_id: String,
    sequence: i32,
    amount: rust_decimal::Decimal,
    is_paid: bool,
    due_date: Option<chrono::NaiveDate>,
    paid_at: Option<chrono::NaiveDateTime>,
    created_at: chrono::NaiveDateTime,
    updated_at: chrono::NaiveDateTime,
}

impl From<InstallmentRow> for Installment {
    fn from(row: InstallmentRow) -> Self {
        Installment {
            id: row.id,
            plan_id: row.plan_id,
            sequence: row.sequence,
            amount: row.amount,
            is_paid: row.is_paid,
            due_date: row.due_date,
            paid_at: row.paid_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

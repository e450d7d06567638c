use sqlx::PgPool;

use crate::core::{AppError, Result};
use crate::modules::settings::models::PaydaySettings;

/// Read access to user settings
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Payday settings for an owner; absent row yields defaults
    pub async fn find_by_owner(&self, user_id: &str) -> Result<PaydaySettings> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            SELECT payday_day_of_month, payday_override
            FROM user_settings
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch settings: {}", e)))?;

        Ok(row
            .map(|r| PaydaySettings {
                payday_day_of_month: r.payday_day_of_month.map(|d| d as u32),
                payday_override: r.payday_override,
            })
            .unwrap_or_default())
    }
}

#[derive(sqlx::FromRow)]
struct SettingsRow {
    payday_day_of_month: Option<i32>,
    payday_override: Option<chrono::NaiveDate>,
}

use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;

use crate::config::AffordabilityConfig;
use crate::core::Result;
use crate::modules::accounts::repositories::AccountRepository;
use crate::modules::affordability::services::projector::{
    project_available_to_spend, AffordabilityPolicy,
};
use crate::modules::cards::repositories::CardRepository;
use crate::modules::plans::repositories::{PlanRepository, PlanStore};
use crate::modules::settings::repositories::SettingsRepository;

/// Response for GET /users/{user_id}/dashboard/available-to-spend
#[derive(Debug, Serialize)]
pub struct AvailableToSpendResponse {
    pub liquid: String,
    pub due_before_payday: String,
    pub available: String,
    pub tier: String,
    pub tone: String,
    pub next_payday: String,
}

/// GET /users/{user_id}/dashboard/available-to-spend
///
/// The dashboard's affordability figure: liquid balances minus
/// obligations due before the next payday.
pub async fn available_to_spend(
    user_id: web::Path<String>,
    pool: web::Data<PgPool>,
    config: web::Data<AffordabilityConfig>,
) -> Result<HttpResponse> {
    let pool = pool.get_ref().clone();
    let user_id = user_id.into_inner();
    let today = chrono::Utc::now().date_naive();

    let accounts = AccountRepository::new(pool.clone())
        .list_by_owner(&user_id)
        .await?;
    let plans = PlanRepository::new(pool.clone()).find_by_owner(&user_id).await?;
    let statements = CardRepository::new(pool.clone())
        .find_pending_by_owner(&user_id)
        .await?;
    let settings = SettingsRepository::new(pool).find_by_owner(&user_id).await?;

    let next_payday = settings.next_payday(today);
    let policy = AffordabilityPolicy {
        caution_threshold: config.caution_threshold,
    };

    let projection = project_available_to_spend(
        &accounts,
        &plans,
        &statements,
        today,
        next_payday,
        &policy,
    );

    Ok(HttpResponse::Ok().json(AvailableToSpendResponse {
        liquid: projection.liquid.to_string(),
        due_before_payday: projection.due_before_payday.to_string(),
        available: projection.available.to_string(),
        tier: projection.tier.as_str().to_string(),
        tone: projection.tier.tone().as_str().to_string(),
        next_payday: projection.next_payday.to_string(),
    }))
}

/// Configure dashboard routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/users/{user_id}/dashboard/available-to-spend",
        web::get().to(available_to_spend),
    );
}

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::core::Result;
use crate::modules::plans::models::Installment;
use crate::modules::plans::repositories::PlanRepository;
use crate::modules::plans::services::plan_service::{
    summarize, NewPlan, PlanService, PlanSummary, ScheduleSaveOutcome,
};

/// Response for a single installment
#[derive(Debug, Serialize)]
pub struct InstallmentResponse {
    pub sequence: i32,
    pub amount: String,
    pub is_paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,
}

impl From<&Installment> for InstallmentResponse {
    fn from(installment: &Installment) -> Self {
        Self {
            sequence: installment.sequence,
            amount: installment.amount.to_string(),
            is_paid: installment.is_paid,
            due_date: installment.due_date.map(|d| d.to_string()),
            paid_at: installment.paid_at.map(|dt| dt.to_string()),
        }
    }
}

/// Summary view of one plan for the BNPL list page
#[derive(Debug, Serialize)]
pub struct PlanSummaryResponse {
    pub id: String,
    pub merchant: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    pub status: String,
    pub total: String,
    pub remaining_balance: String,
    pub paid_installments: i32,
    pub total_installments: i32,
    pub progress_percent: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_installment_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<String>,
    pub due_label: String,
    pub due_tone: String,
    pub installments: Vec<InstallmentResponse>,
}

impl From<PlanSummary> for PlanSummaryResponse {
    fn from(summary: PlanSummary) -> Self {
        Self {
            id: summary.plan.id.clone(),
            merchant: summary.plan.merchant.clone(),
            item_name: summary.plan.item_name.clone(),
            status: summary.plan.status.to_string(),
            total: summary.metrics.total.to_string(),
            remaining_balance: summary.metrics.remaining_balance.to_string(),
            paid_installments: summary.metrics.paid_installments,
            total_installments: summary.metrics.total_installments,
            progress_percent: summary.metrics.progress_percent,
            next_installment_amount: summary
                .metrics
                .next_installment_amount
                .map(|a| a.to_string()),
            next_due_date: summary.metrics.next_due_date.map(|d| d.to_string()),
            due_label: summary.due_label,
            due_tone: summary.due_tone.as_str().to_string(),
            installments: summary.plan.installments.iter().map(Into::into).collect(),
        }
    }
}

/// Request for POST /users/{user_id}/plans
#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    pub merchant: String,
    pub item_name: Option<String>,
    pub account_id: Option<String>,
    pub notes: Option<String>,
    pub total: Decimal,
    pub installment_count: i32,
    pub first_due_date: Option<NaiveDate>,
    pub custom_amounts: Option<Vec<Decimal>>,
}

/// Request for PUT /plans/{plan_id}/installments/{sequence}/paid
#[derive(Debug, Deserialize)]
pub struct SetPaidRequest {
    pub paid: bool,
}

/// Request for PATCH /plans/{plan_id}/installments/{sequence}
#[derive(Debug, Deserialize)]
pub struct EditAmountRequest {
    pub amount: Decimal,
}

/// Request for POST /plans/{plan_id}/schedule and .../redistribute
#[derive(Debug, Deserialize)]
pub struct ReshapeRequest {
    pub total: Decimal,
    pub installment_count: i32,
    /// Whether the edit session has hand-edited amounts
    #[serde(default)]
    pub dirty: bool,
}

/// Response for schedule-mutating saves
#[derive(Debug, Serialize)]
pub struct ScheduleSaveResponse {
    pub plan: PlanSummaryResponse,
    pub regenerated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift_warning: Option<String>,
}

fn service(pool: &web::Data<PgPool>) -> PlanService<PlanRepository> {
    PlanService::new(PlanRepository::new(pool.get_ref().clone()))
}

fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// GET /users/{user_id}/plans
///
/// Returns every plan for the owner with metrics and due state computed
/// as of today.
pub async fn list_plans(
    user_id: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let summaries = service(&pool).list_summaries(&user_id, today()).await?;

    let response: Vec<PlanSummaryResponse> =
        summaries.into_iter().map(PlanSummaryResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// POST /users/{user_id}/plans
///
/// Creates a plan with a generated even split (or explicit amounts) and
/// optional monthly due dates from `first_due_date`.
pub async fn create_plan(
    user_id: web::Path<String>,
    request: web::Json<CreatePlanRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    let svc = service(&pool);

    let plan = svc
        .create_plan(NewPlan {
            user_id: user_id.into_inner(),
            merchant: request.merchant,
            item_name: request.item_name,
            account_id: request.account_id,
            notes: request.notes,
            total: request.total,
            installment_count: request.installment_count,
            first_due_date: request.first_due_date,
            custom_amounts: request.custom_amounts,
        })
        .await?;

    let summary = summarize(plan, today());
    Ok(HttpResponse::Created().json(PlanSummaryResponse::from(summary)))
}

/// GET /plans/{plan_id}
pub async fn get_plan(plan_id: web::Path<String>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let plan = service(&pool).get_plan(&plan_id).await?;
    let summary = summarize(plan, today());
    Ok(HttpResponse::Ok().json(PlanSummaryResponse::from(summary)))
}

/// PUT /plans/{plan_id}/installments/{sequence}/paid
///
/// Marks an installment paid/unpaid; the plan status is re-derived and
/// persisted in the same request (all paid ⇒ completed).
pub async fn set_installment_paid(
    path: web::Path<(String, i32)>,
    request: web::Json<SetPaidRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let (plan_id, sequence) = path.into_inner();
    let summary = service(&pool)
        .set_installment_paid(&plan_id, sequence, request.paid, today())
        .await?;
    Ok(HttpResponse::Ok().json(PlanSummaryResponse::from(summary)))
}

/// PATCH /plans/{plan_id}/installments/{sequence}
///
/// Hand-edits one amount. A drift between the edited sum and the stated
/// total is returned as a warning, never a rejection.
pub async fn edit_installment_amount(
    path: web::Path<(String, i32)>,
    request: web::Json<EditAmountRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let (plan_id, sequence) = path.into_inner();
    let outcome = service(&pool)
        .edit_installment_amount(&plan_id, sequence, request.amount)
        .await?;
    Ok(HttpResponse::Ok().json(save_response(outcome)))
}

/// POST /plans/{plan_id}/schedule
///
/// Applies a total/count change. With `dirty = true` the stored batch is
/// left untouched (manual edits win until an explicit redistribute).
pub async fn reshape_schedule(
    plan_id: web::Path<String>,
    request: web::Json<ReshapeRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let outcome = service(&pool)
        .apply_shape_change(
            &plan_id,
            request.total,
            request.installment_count,
            request.dirty,
        )
        .await?;
    Ok(HttpResponse::Ok().json(save_response(outcome)))
}

/// POST /plans/{plan_id}/redistribute
///
/// One-click reset to an even split, clearing any manual edits.
pub async fn redistribute_schedule(
    plan_id: web::Path<String>,
    request: web::Json<ReshapeRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let outcome = service(&pool)
        .redistribute_schedule(&plan_id, request.total, request.installment_count)
        .await?;
    Ok(HttpResponse::Ok().json(save_response(outcome)))
}

fn save_response(outcome: ScheduleSaveOutcome) -> ScheduleSaveResponse {
    let summary = summarize(outcome.plan, today());
    ScheduleSaveResponse {
        plan: PlanSummaryResponse::from(summary),
        regenerated: outcome.regenerated,
        drift_warning: outcome.drift_warning.map(|d| d.to_string()),
    }
}

/// Configure plan routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users/{user_id}")
            .route("/plans", web::get().to(list_plans))
            .route("/plans", web::post().to(create_plan)),
    )
    .service(
        web::scope("/plans/{plan_id}")
            .route("", web::get().to(get_plan))
            .route("/schedule", web::post().to(reshape_schedule))
            .route("/redistribute", web::post().to(redistribute_schedule))
            .route(
                "/installments/{sequence}",
                web::patch().to(edit_installment_amount),
            )
            .route(
                "/installments/{sequence}/paid",
                web::put().to(set_installment_paid),
            ),
    );
}

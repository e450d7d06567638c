pub mod due_state;
pub mod metrics;
pub mod plan_service;
pub mod schedule;

pub use due_state::{DueState, Tone};
pub use metrics::{compute_metrics, derive_status, PlanMetrics};
pub use plan_service::{NewPlan, PlanService, PlanSummary, ScheduleSaveOutcome};
pub use schedule::{assign_monthly_due_dates, generate_schedule, EditState, ScheduleDraft};

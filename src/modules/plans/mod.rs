pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Installment, InstallmentPlan, PlanStatus};
pub use repositories::{PlanRepository, PlanStore};
pub use services::{compute_metrics, DueState, PlanMetrics, PlanService, ScheduleDraft, Tone};

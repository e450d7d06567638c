mod installment;
mod plan;

pub use installment::Installment;
pub use plan::{InstallmentPlan, PlanStatus};

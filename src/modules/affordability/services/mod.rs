pub mod projector;

pub use projector::{
    project_available_to_spend, AffordabilityPolicy, AvailableToSpend, SpendTier,
};

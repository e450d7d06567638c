pub mod controllers;
pub mod services;

pub use services::{project_available_to_spend, AffordabilityPolicy, AvailableToSpend, SpendTier};

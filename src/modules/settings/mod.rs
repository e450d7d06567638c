pub mod models;
pub mod repositories;

pub use models::PaydaySettings;
pub use repositories::SettingsRepository;

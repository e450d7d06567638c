pub mod models;
pub mod repositories;

pub use models::{Account, AccountKind};
pub use repositories::AccountRepository;

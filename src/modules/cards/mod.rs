pub mod models;
pub mod repositories;

pub use models::{CardStatement, StatementStatus};
pub use repositories::CardRepository;

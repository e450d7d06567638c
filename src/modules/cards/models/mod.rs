mod card_statement;

pub use card_statement::{CardStatement, StatementStatus};

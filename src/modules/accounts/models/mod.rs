mod account;

pub use account::{Account, AccountKind};

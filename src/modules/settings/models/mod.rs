mod payday;

pub use payday::PaydaySettings;

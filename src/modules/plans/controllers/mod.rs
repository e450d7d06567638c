mod plan_controller;

pub use plan_controller::configure;

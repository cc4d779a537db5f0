pub mod alerts_controller;
pub mod health_controller;
pub mod stocks_controller;

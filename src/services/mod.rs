pub mod market_data;
pub mod registry;
pub mod alert_monitor;

pub mod alerts_service;
pub mod notifier;

pub mod alert;
pub mod price;

pub use alert::{AlertRecord, AlertStatus};
pub use price::PricePoint;

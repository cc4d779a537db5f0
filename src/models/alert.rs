use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Triggered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: u64,

    pub symbol: String,
    pub threshold: f64,

    // notification destination (opaque; usually an email address)
    pub target: String,

    pub status: AlertStatus,

    pub created_at: DateTime<Utc>,
    pub triggered_at: Option<DateTime<Utc>>,

    // degraded-state signal: set while the symbol cannot be checked
    pub last_error: Option<String>,
    pub consecutive_failures: u32,
}

impl AlertRecord {
    pub fn is_active(&self) -> bool {
        self.status == AlertStatus::Active
    }
}

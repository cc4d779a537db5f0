use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::RwLock;

use crate::models::{AlertRecord, AlertStatus};

/// In-memory store of alert records.
///
/// Cloning the registry clones the handle, not the records; the presentation
/// side and the alert monitor share one underlying list. Records live for
/// the lifetime of the process.
#[derive(Clone, Default)]
pub struct AlertRegistry {
    records: Arc<RwLock<Vec<AlertRecord>>>,
    next_id: Arc<AtomicU64>,
}

impl AlertRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new `Active` record. Never deduplicates: two alerts on the
    /// same symbol are independent and both may fire.
    pub fn add(&self, symbol: String, threshold: f64, target: String) -> AlertRecord {
        let record = AlertRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            symbol,
            threshold,
            target,
            status: AlertStatus::Active,
            created_at: Utc::now(),
            triggered_at: None,
            last_error: None,
            consecutive_failures: 0,
        };

        self.records.write().push(record.clone());
        record
    }

    /// Snapshot of all records, insertion order.
    pub fn list(&self) -> Vec<AlertRecord> {
        self.records.read().clone()
    }

    pub fn get(&self, id: u64) -> Option<AlertRecord> {
        self.records.read().iter().find(|r| r.id == id).cloned()
    }

    pub fn remove(&self, id: u64) -> bool {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.id != id);
        records.len() != before
    }

    /// Snapshot of records still worth polling.
    pub fn active(&self) -> Vec<AlertRecord> {
        self.records
            .read()
            .iter()
            .filter(|r| r.is_active())
            .cloned()
            .collect()
    }

    /// `Active` -> `Triggered`, at most once per record. Returns whether
    /// this call performed the transition; callers only notify when it did.
    pub fn mark_triggered(&self, id: u64) -> bool {
        let mut records = self.records.write();

        match records.iter_mut().find(|r| r.id == id && r.is_active()) {
            Some(r) => {
                r.status = AlertStatus::Triggered;
                r.triggered_at = Some(Utc::now());
                r.last_error = None;
                r.consecutive_failures = 0;
                true
            }
            None => false,
        }
    }

    /// Record a failed poll tick for an active alert.
    pub fn record_failure(&self, id: u64, error: &str) {
        let mut records = self.records.write();

        if let Some(r) = records.iter_mut().find(|r| r.id == id && r.is_active()) {
            r.consecutive_failures += 1;
            r.last_error = Some(error.to_string());
        }
    }

    /// Clear the degraded-state signal after a successful poll tick.
    pub fn record_success(&self, id: u64) {
        let mut records = self.records.write();

        if let Some(r) = records.iter_mut().find(|r| r.id == id && r.is_active()) {
            r.consecutive_failures = 0;
            r.last_error = None;
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

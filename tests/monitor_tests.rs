use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use parking_lot::Mutex;
use pricewatch::models::{AlertStatus, PricePoint};
use pricewatch::services::alert_monitor::run_tick;
use pricewatch::services::market_data::{MarketDataError, PriceSource};
use pricewatch::services::notifier::{Notifier, NotifyError};
use pricewatch::services::registry::AlertRegistry;

fn point(price: f64) -> PricePoint {
    PricePoint {
        timestamp: NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(19, 55, 0)
            .unwrap(),
        price,
    }
}

/// Returns one scripted result per fetch, in order.
struct ScriptedSource {
    script: Mutex<VecDeque<Result<PricePoint, MarketDataError>>>,
    fetches: AtomicUsize,
}

impl ScriptedSource {
    fn new(script: Vec<Result<PricePoint, MarketDataError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fetches: AtomicUsize::new(0),
        }
    }

    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl PriceSource for ScriptedSource {
    async fn fetch_latest(&self, _symbol: &str) -> Result<PricePoint, MarketDataError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(MarketDataError::DataUnavailable("script exhausted".into())))
    }
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingNotifier {
    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, target: &str, message: &str) -> Result<(), NotifyError> {
        self.calls.lock().push((target.to_string(), message.to_string()));
        Ok(())
    }
}

struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn notify(&self, _target: &str, _message: &str) -> Result<(), NotifyError> {
        Err(NotifyError::Delivery("smtp refused".to_string()))
    }
}

#[tokio::test]
async fn alert_triggers_once_on_first_qualifying_tick() {
    let registry = AlertRegistry::new();
    let record = registry.add("ACME".into(), 100.0, "a@b.com".into());

    let source = ScriptedSource::new(vec![
        Ok(point(90.0)),
        Ok(point(90.0)),
        Ok(point(101.5)),
        Ok(point(150.0)),
    ]);
    let notifier = RecordingNotifier::default();

    run_tick(&registry, &source, &notifier).await;
    run_tick(&registry, &source, &notifier).await;
    assert_eq!(registry.get(record.id).unwrap().status, AlertStatus::Active);
    assert!(notifier.calls().is_empty());

    run_tick(&registry, &source, &notifier).await;

    let stored = registry.get(record.id).unwrap();
    assert_eq!(stored.status, AlertStatus::Triggered);
    assert!(stored.triggered_at.is_some());

    let calls = notifier.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "a@b.com");
    assert!(calls[0].1.contains("ACME"));
    assert!(calls[0].1.contains("101.5"));

    // A triggered record is never polled or notified again.
    run_tick(&registry, &source, &notifier).await;
    assert_eq!(notifier.calls().len(), 1);
    assert_eq!(source.fetch_count(), 3);
}

#[tokio::test]
async fn failing_source_keeps_alert_active_and_counts_failures() {
    let registry = AlertRegistry::new();
    let record = registry.add("ACME".into(), 100.0, "a@b.com".into());

    let source = ScriptedSource::new(vec![
        Err(MarketDataError::Network("connection refused".into())),
        Err(MarketDataError::DataUnavailable("rate limited".into())),
        Err(MarketDataError::Network("timed out".into())),
    ]);
    let notifier = RecordingNotifier::default();

    for _ in 0..3 {
        run_tick(&registry, &source, &notifier).await;
    }

    let stored = registry.get(record.id).unwrap();
    assert_eq!(stored.status, AlertStatus::Active);
    assert_eq!(stored.consecutive_failures, 3);
    assert!(stored.last_error.as_deref().unwrap().contains("timed out"));
    assert!(notifier.calls().is_empty());
}

#[tokio::test]
async fn successful_tick_clears_failure_counter() {
    let registry = AlertRegistry::new();
    let record = registry.add("ACME".into(), 100.0, "a@b.com".into());

    let source = ScriptedSource::new(vec![
        Err(MarketDataError::Network("timed out".into())),
        Ok(point(90.0)),
    ]);
    let notifier = RecordingNotifier::default();

    run_tick(&registry, &source, &notifier).await;
    assert_eq!(registry.get(record.id).unwrap().consecutive_failures, 1);

    run_tick(&registry, &source, &notifier).await;

    let stored = registry.get(record.id).unwrap();
    assert_eq!(stored.status, AlertStatus::Active);
    assert_eq!(stored.consecutive_failures, 0);
    assert!(stored.last_error.is_none());
}

#[tokio::test]
async fn one_quote_request_per_symbol_per_tick() {
    let registry = AlertRegistry::new();
    let low = registry.add("ACME".into(), 100.0, "a@b.com".into());
    let high = registry.add("ACME".into(), 200.0, "c@d.com".into());

    let source = ScriptedSource::new(vec![Ok(point(150.0))]);
    let notifier = RecordingNotifier::default();

    run_tick(&registry, &source, &notifier).await;

    assert_eq!(source.fetch_count(), 1);
    assert_eq!(registry.get(low.id).unwrap().status, AlertStatus::Triggered);
    assert_eq!(registry.get(high.id).unwrap().status, AlertStatus::Active);
    assert_eq!(notifier.calls().len(), 1);
}

#[tokio::test]
async fn notification_failure_does_not_revert_trigger() {
    let registry = AlertRegistry::new();
    let record = registry.add("ACME".into(), 100.0, "a@b.com".into());

    let source = ScriptedSource::new(vec![Ok(point(120.0))]);

    run_tick(&registry, &source, &FailingNotifier).await;

    assert_eq!(
        registry.get(record.id).unwrap().status,
        AlertStatus::Triggered
    );
}

#[tokio::test]
async fn exact_threshold_price_triggers() {
    let registry = AlertRegistry::new();
    let record = registry.add("ACME".into(), 100.0, "a@b.com".into());

    let source = ScriptedSource::new(vec![Ok(point(100.0))]);
    let notifier = RecordingNotifier::default();

    run_tick(&registry, &source, &notifier).await;

    assert_eq!(
        registry.get(record.id).unwrap().status,
        AlertStatus::Triggered
    );
    assert_eq!(notifier.calls().len(), 1);
}

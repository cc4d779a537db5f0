use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

use crate::models::AlertRecord;
use crate::services::market_data::PriceSource;
use crate::services::notifier::Notifier;
use crate::services::registry::AlertRegistry;

/// Spawn the background alert checker.
///
/// One task covers every registered alert: each tick it snapshots the active
/// records, fetches one quote per symbol, and fires the matching alerts.
/// Returns the task handle and a shutdown sender for clean termination.
pub fn spawn_price_alert_monitor<S, N>(
    registry: AlertRegistry,
    source: S,
    notifier: N,
    poll_interval: Duration,
) -> (JoinHandle<()>, mpsc::Sender<()>)
where
    S: PriceSource,
    N: Notifier,
{
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

    let handle = tokio::spawn(async move {
        let mut interval = time::interval(poll_interval);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    run_tick(&registry, &source, &notifier).await;
                }
                _ = shutdown_rx.recv() => {
                    tracing::info!("alert monitor shutting down");
                    break;
                }
            }
        }
    });

    (handle, shutdown_tx)
}

/// One poll tick over every active alert.
///
/// Fetch failures are recorded on the affected records and deferred to the
/// next tick; no alert is lost to a transient outage.
pub async fn run_tick<S, N>(registry: &AlertRegistry, source: &S, notifier: &N)
where
    S: PriceSource,
    N: Notifier,
{
    // Group by symbol => only 1 quote request per symbol per tick
    let mut by_symbol: HashMap<String, Vec<AlertRecord>> = HashMap::new();
    for record in registry.active() {
        by_symbol
            .entry(record.symbol.clone())
            .or_default()
            .push(record);
    }

    if by_symbol.is_empty() {
        return;
    }

    for (symbol, group) in by_symbol {
        let point = match source.fetch_latest(&symbol).await {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "price check failed");
                let reason = e.to_string();
                for record in &group {
                    registry.record_failure(record.id, &reason);
                }
                continue;
            }
        };

        for record in group {
            registry.record_success(record.id);

            if point.price < record.threshold {
                continue;
            }

            // Mark first; only the caller that wins the transition notifies,
            // so delivery is at most once even across racing ticks.
            if !registry.mark_triggered(record.id) {
                continue;
            }

            tracing::info!(
                alert_id = record.id,
                symbol = %record.symbol,
                price = point.price,
                threshold = record.threshold,
                "alert triggered"
            );

            let message = format!(
                "ALERT: {} has reached the threshold of {}. Current price: {}",
                record.symbol, record.threshold, point.price
            );

            if let Err(e) = notifier.notify(&record.target, &message) {
                // The trigger stands even if delivery fails.
                tracing::error!(alert_id = record.id, error = %e, "failed to send notification");
            }
        }
    }
}

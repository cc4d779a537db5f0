use std::net::SocketAddr;
use std::time::Duration;

use pricewatch::services::alert_monitor::spawn_price_alert_monitor;
use pricewatch::services::market_data::AlphaVantageClient;
use pricewatch::services::notifier::LogNotifier;
use pricewatch::services::registry::AlertRegistry;
use pricewatch::{AppState, config, routes};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    let market = AlphaVantageClient::new(
        settings.api_key.clone(),
        settings.market_base_url.clone(),
        Duration::from_secs(settings.request_timeout_secs),
    )?;

    let registry = AlertRegistry::new();

    let state = AppState {
        settings: settings.clone(),
        market: market.clone(),
        registry: registry.clone(),
    };

    // Background checker: one task covers all alerts at a fixed interval.
    let (_monitor, _monitor_shutdown) = spawn_price_alert_monitor(
        registry,
        market,
        LogNotifier,
        Duration::from_secs(settings.poll_interval_secs),
    );

    let app = routes::app(state);

    let addr = SocketAddr::from((settings.host.parse::<std::net::IpAddr>()?, settings.port));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

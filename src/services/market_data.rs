use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::models::PricePoint;

#[derive(Debug, thiserror::Error)]
pub enum MarketDataError {
    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered, but the response carries no usable price
    /// (unknown symbol, rate limit, changed payload shape).
    #[error("no usable price data: {0}")]
    DataUnavailable(String),
}

/// Anything the alert monitor can poll for a latest price.
pub trait PriceSource: Send + Sync + 'static {
    fn fetch_latest(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<PricePoint, MarketDataError>> + Send;
}

#[derive(Clone)]
pub struct AlphaVantageClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl AlphaVantageClient {
    pub fn new(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_key,
            base_url,
        })
    }

    fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Full intraday series for a symbol, oldest point first.
    pub async fn fetch_series(&self, symbol: &str) -> Result<Vec<PricePoint>, MarketDataError> {
        if !self.has_key() {
            return Err(MarketDataError::DataUnavailable(
                "API_KEY is missing in .env".to_string(),
            ));
        }

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("function", "TIME_SERIES_INTRADAY"),
                ("symbol", symbol),
                ("interval", "5min"),
                ("outputsize", "compact"),
                ("datatype", "json"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| MarketDataError::Network(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            return Err(MarketDataError::DataUnavailable(format!(
                "quote request failed: {status}"
            )));
        }

        let body = res
            .text()
            .await
            .map_err(|e| MarketDataError::Network(e.to_string()))?;

        parse_intraday(&body)
    }
}

impl PriceSource for AlphaVantageClient {
    async fn fetch_latest(&self, symbol: &str) -> Result<PricePoint, MarketDataError> {
        let mut series = self.fetch_series(symbol).await?;

        series
            .pop()
            .ok_or_else(|| MarketDataError::DataUnavailable("time series is empty".to_string()))
    }
}

#[derive(Deserialize)]
struct IntradayResponse {
    #[serde(rename = "Time Series (5min)")]
    series: Option<BTreeMap<String, IntradayBar>>,

    // Alpha Vantage reports rate limits under "Note" and bad symbols under
    // "Error Message", both with HTTP 200.
    #[serde(rename = "Note")]
    note: Option<String>,

    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct IntradayBar {
    #[serde(rename = "4. close")]
    close: String,
}

/// Classify and convert a raw intraday response body.
///
/// Anything structurally unexpected becomes `DataUnavailable`, never a
/// default price.
fn parse_intraday(body: &str) -> Result<Vec<PricePoint>, MarketDataError> {
    let parsed: IntradayResponse = serde_json::from_str(body)
        .map_err(|e| MarketDataError::DataUnavailable(format!("unexpected payload: {e}")))?;

    let Some(series) = parsed.series else {
        let reason = parsed
            .error_message
            .or(parsed.note)
            .unwrap_or_else(|| "response has no time series".to_string());
        return Err(MarketDataError::DataUnavailable(reason));
    };

    if series.is_empty() {
        return Err(MarketDataError::DataUnavailable(
            "time series is empty".to_string(),
        ));
    }

    // BTreeMap iteration over "YYYY-MM-DD HH:MM:SS" keys is already
    // chronological, oldest first.
    let mut points = Vec::with_capacity(series.len());
    for (stamp, bar) in series {
        let timestamp = NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%d %H:%M:%S")
            .map_err(|_| MarketDataError::DataUnavailable(format!("bad timestamp: {stamp}")))?;

        let price: f64 = bar.close.trim().parse().map_err(|_| {
            MarketDataError::DataUnavailable(format!("bad close price: {}", bar.close))
        })?;

        if !price.is_finite() || price < 0.0 {
            return Err(MarketDataError::DataUnavailable(format!(
                "bad close price: {price}"
            )));
        }

        points.push(PricePoint { timestamp, price });
    }

    Ok(points)
}

use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    pub api_key: String,
    pub market_base_url: String,

    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let api_key = env::var("API_KEY").unwrap_or_default();

    let market_base_url = env::var("MARKET_BASE_URL")
        .unwrap_or_else(|_| "https://www.alphavantage.co/query".to_string());

    // Alert checks run every 5 minutes by default
    let poll_interval_secs = env::var("POLL_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(300);

    let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(10);

    Settings {
        host,
        port,
        api_key,
        market_base_url,
        poll_interval_secs,
        request_timeout_secs,
    }
}

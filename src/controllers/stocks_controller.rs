use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::AppState;
use crate::services::market_data::{MarketDataError, PriceSource};

fn empty_symbol_response() -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": "empty_symbol", "message": "symbol must not be empty" })),
    )
        .into_response()
}

fn market_error_response(err: MarketDataError) -> Response {
    let kind = match &err {
        MarketDataError::Network(_) => "network_error",
        MarketDataError::DataUnavailable(_) => "data_unavailable",
    };

    (
        StatusCode::BAD_GATEWAY,
        Json(json!({ "error": kind, "message": err.to_string() })),
    )
        .into_response()
}

// GET /stock/:symbol
pub async fn get_stock_quote(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Response {
    let sym = symbol.trim().to_uppercase();
    if sym.is_empty() {
        return empty_symbol_response();
    }

    match state.market.fetch_latest(&sym).await {
        Ok(point) => Json(json!({
            "symbol": sym,
            "price": point.price,
            "lastUpdated": point.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        }))
        .into_response(),
        Err(e) => market_error_response(e),
    }
}

// GET /stock/:symbol/series
pub async fn get_stock_series(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Response {
    let sym = symbol.trim().to_uppercase();
    if sym.is_empty() {
        return empty_symbol_response();
    }

    match state.market.fetch_series(&sym).await {
        Ok(points) => Json(json!({ "symbol": sym, "points": points })).into_response(),
        Err(e) => market_error_response(e),
    }
}

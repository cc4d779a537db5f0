use axum::{Router, routing::get};

use crate::{AppState, controllers::stocks_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/stock/:symbol", get(stocks_controller::get_stock_quote))
        .route("/stock/:symbol/series", get(stocks_controller::get_stock_series))
}

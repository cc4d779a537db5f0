use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{AppState, controllers::health_controller};

pub mod alerts_routes;
pub mod stocks_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = alerts_routes::add_routes(router);
    let router = stocks_routes::add_routes(router);

    // The dashboard is a separate frontend, so the API stays open to
    // cross-origin requests.
    router
        .route("/health", get(health_controller::health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! HTTP route handlers.

pub mod health;
pub mod section;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the complete application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(section::router())
        .merge(section::listing_router(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

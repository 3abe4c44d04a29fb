//! HTTP route definitions and handlers.

mod health_routes;
mod metrics_routes;

use crate::state::AppState;
use axum::Router;

pub use metrics_routes::METRICS_CONTENT_TYPE;

/// Creates the application router with all configured routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(metrics_routes::routes())
        .merge(health_routes::routes())
        .with_state(state)
}

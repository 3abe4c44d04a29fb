//! Metrics exposition endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use http::header::CONTENT_TYPE;
use tracing::error;

use crate::config::QueryErrorPolicy;
use crate::metrics::ScrapeError;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Creates the metrics route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics_handler))
}

/// Handler for the /metrics endpoint.
///
/// Every call queries Druid. A failed query either terminates the process or
/// answers 503, depending on `on_query_error`.
async fn metrics_handler(State(state): State<AppState>) -> Result<impl IntoResponse, HTTPError> {
    match state.publisher.scrape().await {
        Ok(body) => Ok((StatusCode::OK, [(CONTENT_TYPE, METRICS_CONTENT_TYPE)], body)),
        Err(ScrapeError::Query(e)) => {
            error!(
                event_name = "scrape.query_failed",
                event_domain = "scrape",
                error_kind = e.kind(),
                druid_uri = state.publisher.source().endpoint(),
                error = %e,
                "Druid task query failed"
            );
            match state.config.on_query_error {
                QueryErrorPolicy::Exit => std::process::exit(1),
                QueryErrorPolicy::Respond => {
                    Err(HTTPError::new(StatusCode::SERVICE_UNAVAILABLE, e.to_string()))
                }
            }
        }
        Err(e @ ScrapeError::Encode(_)) => {
            error!(
                event_name = "scrape.encode_failed",
                event_domain = "scrape",
                error = %e,
                "failed to encode task metrics"
            );
            Err(HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

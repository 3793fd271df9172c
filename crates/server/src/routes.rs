use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error};

use fleet_api_types::{
    ALLOW_HEADERS, ALLOW_METHODS, ALLOW_ORIGIN, CACHE_CONTROL, ErrorBody, TRANSPORTATION_PATH,
};
use fleet_core::fetch::UpstreamClient;

pub fn create_router(upstream: Arc<UpstreamClient>) -> Router {
    Router::new()
        .route(TRANSPORTATION_PATH, get(transportation))
        .route("/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .with_state(upstream)
}

/// Forward the upstream body only once it has parsed as JSON, so a truncated
/// or corrupt body is never passed on as a success.
async fn transportation(State(upstream): State<Arc<UpstreamClient>>) -> Response {
    match upstream.get_json::<serde_json::Value>().await {
        Ok(body) => {
            debug!("forwarding upstream snapshot");
            (
                StatusCode::OK,
                [
                    (header::CACHE_CONTROL, CACHE_CONTROL),
                    (header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN),
                    (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
                    (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
                ],
                Json(body),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, upstream = upstream.url(), "error fetching transportation data");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::fetch_failed(e.to_string())),
            )
                .into_response()
        }
    }
}

async fn health() -> &'static str {
    "OK"
}

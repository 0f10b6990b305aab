//! HTTP surface for iPXE boot.
//!
//! Serves published boot artifacts to iPXE clients along with the
//! deployment API and a health check. Any path not claimed by the API is
//! looked up in the artifact store.

use crate::api;
use crate::service::DeploymentService;
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Builds the router with all boot and API routes.
pub fn router(service: Arc<DeploymentService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/deployment", get(api::get_deployment).post(api::post_deployment))
        .route("/deployment/{mac}", get(api::find_deployment))
        .route("/etcd/plan", post(api::plan_etcd))
        .fallback(serve_artifact)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(service)
}

async fn health() -> impl IntoResponse {
    axum::Json(json!({ "alive": true }))
}

async fn serve_artifact(State(service): State<Arc<DeploymentService>>, uri: Uri) -> Response {
    debug!("Requested URL [{}]", uri.path());
    match service.artifacts().get(uri.path()) {
        Some(content) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain")],
            content.to_string(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

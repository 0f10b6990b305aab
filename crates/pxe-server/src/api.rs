//! Deployment API.
//!
//! JSON endpoints for operators and the DHCP layer:
//! - `GET /deployment` returns the registered manifest
//! - `POST /deployment` submits a new manifest
//! - `GET /deployment/{mac}` looks up the boot configuration for a MAC
//! - `POST /etcd/plan` returns the etcd bootstrap action plan for a topology

use crate::service::{DeploymentService, UpdateOutcome};
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use etcd_plan::EtcdTopology;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Lookup result for a single MAC address.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentLookup {
    /// MAC address as requested
    pub mac: String,
    /// Boot configuration the machine deploys with
    pub config_name: String,
}

pub(crate) async fn get_deployment(State(service): State<Arc<DeploymentService>>) -> Response {
    let snapshot = service.current();
    Json(&*snapshot).into_response()
}

pub(crate) async fn post_deployment(
    State(service): State<Arc<DeploymentService>>,
    body: Bytes,
) -> Response {
    match service.update_from_json(&body) {
        Ok(UpdateOutcome::Updated { entries }) => {
            (StatusCode::OK, Json(json!({ "status": "updated", "entries": entries }))).into_response()
        }
        Ok(UpdateOutcome::Unchanged) => {
            (StatusCode::OK, Json(json!({ "status": "unchanged", "entries": 0 }))).into_response()
        }
        Err(e) => {
            warn!("Rejected deployment configuration: {}", e);
            (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

pub(crate) async fn find_deployment(
    State(service): State<Arc<DeploymentService>>,
    Path(mac): Path<String>,
) -> Response {
    match service.find_deployment(&mac) {
        Some(config_name) => Json(DeploymentLookup { mac, config_name }).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub(crate) async fn plan_etcd(Json(topology): Json<EtcdTopology>) -> Response {
    if let Err(e) = topology.validate() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response();
    }
    let actions = etcd_plan::plan(&topology);
    info!("Generated [{}] etcd bootstrap actions", actions.len());
    Json(actions).into_response()
}

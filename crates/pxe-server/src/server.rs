//! Main boot server.
//!
//! Publishes the catalog's boot scripts and serves the HTTP router until a
//! shutdown signal arrives. Binding to `[::]` serves both IPv4 and IPv6
//! clients on dual-stack hosts.

use crate::error::PxeError;
use crate::http::router;
use crate::service::DeploymentService;
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

/// HTTP boot server for iPXE clients and the deployment API.
#[derive(Debug)]
pub struct BootServer {
    listen: SocketAddr,
    service: Arc<DeploymentService>,
}

impl BootServer {
    /// Creates a new boot server instance.
    pub fn new(listen: SocketAddr, service: Arc<DeploymentService>) -> Self {
        Self { listen, service }
    }

    /// Service backing the routes.
    pub fn service(&self) -> &Arc<DeploymentService> {
        &self.service
    }

    /// Starts the server and runs until ctrl-c.
    pub async fn start(&self) -> Result<()> {
        info!("Starting boot server on {}", self.listen);

        let published = self.service.publish_boot_types().map_err(PxeError::from)?;
        info!("Published [{}] boot type scripts", published);

        let listener = tokio::net::TcpListener::bind(self.listen)
            .await
            .map_err(PxeError::Io)?;
        axum::serve(listener, router(Arc::clone(&self.service)))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| PxeError::Http(e.to_string()))?;

        info!("Boot server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Unable to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down boot server");
}

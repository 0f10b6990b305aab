//! Provisioner
//!
//! Serves network-boot artifacts for bare-metal hosts.
//!
//! The provisioner loads a catalog of boot configurations, optionally applies
//! a startup deployment manifest, and serves iPXE scripts, installer answer
//! files and the deployment API over HTTP.

mod config;
mod error;

use crate::config::Config;
use crate::error::ProvisionerError;
use pxe_server::{BootCatalog, BootServer, DeploymentService, UpdateOutcome};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ProvisionerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Provisioner");

    let config = Config::from_env()?;
    info!("Configuration:");
    info!("  Listen: {}", config.listen);
    info!("  HTTP address: {}", config.http_address);
    info!("  Boot configs: {}", config.boot_configs_path);
    info!("  Any-boot: {}", config.any_boot);

    let catalog = BootCatalog::new(config::load_boot_configs(&config.boot_configs_path)?);
    info!("Loaded [{}] boot configurations", catalog.len());

    let service = DeploymentService::new(config.http_address.clone(), catalog)
        .with_any_boot(config.any_boot)
        .into_shared();

    if let Some(path) = &config.deployment_path {
        let manifest = config::load_deployment(path)?;
        match service.update_from_json(&manifest)? {
            UpdateOutcome::Updated { entries } => info!("Applied [{}] deployments from {}", entries, path),
            UpdateOutcome::Unchanged => info!("Startup deployment {} has no entries", path),
        }
    }

    BootServer::new(config.listen, service).start().await?;

    Ok(())
}

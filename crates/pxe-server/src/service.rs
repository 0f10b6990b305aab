//! Deployment service.
//!
//! Owns the boot catalog, the artifact store and the deployment registry,
//! and runs the validate → render → publish → swap pass for manifest
//! updates. Update passes are serialized; lookups and artifact reads never
//! wait on a pass beyond the brief write guards taken to commit it.

use crate::artifacts::ArtifactStore;
use crate::dispatcher::BootArtifactDispatcher;
use crate::error::ResolutionError;
use crate::registry::{DeploymentRegistry, RegistrySnapshot};
use crate::resolver::{BootCatalog, resolve};
use deployment_types::{ANYBOOT, DeploymentManifest};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Result of a successful update call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The manifest was resolved, published and swapped in
    Updated {
        /// Number of entries in the new manifest
        entries: usize,
    },
    /// The manifest had no entries, existing configuration was kept
    Unchanged,
}

/// Boot catalog, artifacts and registry behind one update pass.
#[derive(Debug)]
pub struct DeploymentService {
    catalog: BootCatalog,
    dispatcher: BootArtifactDispatcher,
    registry: DeploymentRegistry,
    artifacts: ArtifactStore,
    any_boot: bool,
    update_lock: Mutex<()>,
}

impl DeploymentService {
    /// Creates a new service serving artifacts that reference `http_address`.
    pub fn new(http_address: impl Into<String>, catalog: BootCatalog) -> Self {
        Self {
            catalog,
            dispatcher: BootArtifactDispatcher::new(http_address),
            registry: DeploymentRegistry::new(),
            artifacts: ArtifactStore::new(),
            any_boot: false,
            update_lock: Mutex::new(()),
        }
    }

    /// In any-boot mode every machine boots the configured kernel, manifest
    /// lookups are bypassed.
    #[must_use]
    pub fn with_any_boot(mut self, any_boot: bool) -> Self {
        self.any_boot = any_boot;
        self
    }

    /// Wraps the service for sharing with HTTP handlers.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Boot configurations this service resolves against.
    pub fn catalog(&self) -> &BootCatalog {
        &self.catalog
    }

    /// Published artifacts.
    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Whether any-boot mode is enabled.
    pub fn any_boot(&self) -> bool {
        self.any_boot
    }

    /// Current registry snapshot.
    pub fn current(&self) -> Arc<RegistrySnapshot> {
        self.registry.current()
    }

    /// Publishes the per-kind boot scripts derived from the catalog.
    pub fn publish_boot_types(&self) -> Result<usize, ResolutionError> {
        let _guard = self.update_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let artifacts = self.dispatcher.render_boot_types(&self.catalog)?;
        Ok(self.artifacts.publish_all(artifacts).len())
    }

    /// Parses a JSON manifest and applies it with [`Self::update`].
    pub fn update_from_json(&self, body: &[u8]) -> Result<UpdateOutcome, ResolutionError> {
        let manifest: DeploymentManifest = serde_json::from_slice(body)?;
        self.update(manifest)
    }

    /// Resolves, publishes and registers `manifest`.
    ///
    /// Every entry is resolved and every artifact rendered before anything
    /// is published, so a failure leaves both the artifacts and the registry
    /// exactly as they were. An update without entries is ignored.
    pub fn update(&self, manifest: DeploymentManifest) -> Result<UpdateOutcome, ResolutionError> {
        let _guard = self.update_lock.lock().unwrap_or_else(PoisonError::into_inner);
        info!("Updating the Deployment Configuration");

        if manifest.is_empty() {
            warn!("No deployment configuration, any existing configuration will remain");
            return Ok(UpdateOutcome::Unchanged);
        }

        let resolved = resolve(manifest, &self.catalog)?;

        let mut artifacts = Vec::new();
        for entry in &resolved.entries {
            artifacts.extend(self.dispatcher.render(entry)?);
        }

        let published = self.artifacts.publish_all(artifacts).len();
        let entries = resolved.entries.len();
        self.registry.replace(resolved.manifest);

        info!(entries, published, "Updating of deployment configuration complete");
        Ok(UpdateOutcome::Updated { entries })
    }

    /// Name of the boot configuration `mac` deploys with.
    ///
    /// Returns `"anyboot"` for every MAC when any-boot mode is enabled.
    /// MAC comparison ignores case.
    pub fn find_deployment(&self, mac: &str) -> Option<String> {
        if self.any_boot {
            return Some(ANYBOOT.to_string());
        }

        let snapshot = self.registry.current();
        if snapshot.deployment.is_empty() {
            warn!("Attempted to perform Mac Address lookup, however no configurations have been loaded");
            return None;
        }

        debug!("Looking up deployment for [{}]", mac);
        snapshot
            .deployment
            .find_entry(mac)
            .map(|entry| entry.config_name.clone())
    }
}

//! Deployment resolution.
//!
//! Validates a submitted manifest against the boot catalog and resolves each
//! entry's profile. Resolution is all or nothing: a single unknown boot
//! configuration or a MAC listed twice rejects the whole manifest.

use crate::error::ResolutionError;
use deployment_types::{BootConfig, DeploymentManifest, HostBootProfile, ProfileKind, dashed_mac};
use std::collections::HashSet;
use tracing::debug;

/// Named boot configurations known to this server.
#[derive(Debug, Clone, Default)]
pub struct BootCatalog {
    configs: Vec<BootConfig>,
}

impl BootCatalog {
    /// Creates a new catalog from the configured boot configurations.
    pub fn new(configs: Vec<BootConfig>) -> Self {
        Self { configs }
    }

    /// Finds a boot configuration by name.
    pub fn find(&self, name: &str) -> Option<&BootConfig> {
        self.configs.iter().find(|config| config.config_name == name)
    }

    /// All boot configurations, in load order.
    pub fn configs(&self) -> &[BootConfig] {
        &self.configs
    }

    /// Number of boot configurations.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Whether no boot configurations are loaded.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

/// An entry with its boot configuration and inherited profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    /// MAC address as submitted
    pub mac: String,
    /// Boot configuration name as submitted
    pub config_name: String,
    /// Installer family the name classifies to
    pub kind: ProfileKind,
    /// Catalog entry the name resolved to
    pub boot: BootConfig,
    /// Host profile after inheritance
    pub host: HostBootProfile,
}

/// A manifest where every entry resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedManifest {
    /// Manifest as it will be stored in the registry, with inherited host
    /// profiles and each entry's boot configuration filled in
    pub manifest: DeploymentManifest,
    /// Resolved entries, in submission order
    pub entries: Vec<ResolvedEntry>,
}

/// Resolves every entry of `manifest` against `catalog`.
pub fn resolve(
    mut manifest: DeploymentManifest,
    catalog: &BootCatalog,
) -> Result<ResolvedManifest, ResolutionError> {
    debug!("Parsing [{}] Configurations", manifest.configs.len());

    let mut entries = Vec::with_capacity(manifest.configs.len());
    let mut seen = HashSet::with_capacity(manifest.configs.len());
    for entry in &mut manifest.configs {
        // Entries sharing a MAC would publish to the same artifact paths
        if !seen.insert(dashed_mac(&entry.mac)) {
            return Err(ResolutionError::DuplicateMac {
                mac: entry.mac.clone(),
            });
        }

        let boot = catalog
            .find(&entry.config_name)
            .cloned()
            .ok_or_else(|| ResolutionError::UnknownBootConfig {
                mac: entry.mac.clone(),
                config_name: entry.config_name.clone(),
            })?;

        entry.config.inherit_from(&manifest.global_config);
        entry.boot_config = Some(boot.clone());

        entries.push(ResolvedEntry {
            mac: entry.mac.clone(),
            config_name: entry.config_name.clone(),
            kind: ProfileKind::from_config_name(&entry.config_name),
            boot,
            host: entry.config.clone(),
        });
    }

    Ok(ResolvedManifest { manifest, entries })
}

//! Deployment registry.
//!
//! Holds the last manifest that passed a full resolution. Starts empty and is
//! only ever replaced wholesale; readers get an `Arc` to a complete snapshot.

use chrono::{DateTime, Utc};
use deployment_types::DeploymentManifest;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};

/// The registered manifest as readers see it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySnapshot {
    /// When the manifest was swapped in, `None` until the first update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    /// Manifest from the last successful update
    pub deployment: DeploymentManifest,
}

/// Holds the current snapshot, replaced whole on each update.
#[derive(Debug, Default)]
pub struct DeploymentRegistry {
    current: RwLock<Arc<RegistrySnapshot>>,
}

impl DeploymentRegistry {
    /// Creates a new registry with an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot.
    pub fn current(&self) -> Arc<RegistrySnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Swaps in `manifest`, returning the snapshot it replaced.
    pub(crate) fn replace(&self, manifest: DeploymentManifest) -> Arc<RegistrySnapshot> {
        let next = Arc::new(RegistrySnapshot {
            last_updated: Some(Utc::now()),
            deployment: manifest,
        });
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, next)
    }
}

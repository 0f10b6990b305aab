//! Deployment manifest
//!
//! Maps MAC addresses to boot configurations and host profiles.

use crate::boot_profile::BootConfig;
use crate::host_profile::HostBootProfile;
use serde::{Deserialize, Serialize};

/// A submitted deployment: global defaults plus one entry per host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentManifest {
    /// Defaults inherited by every entry
    #[serde(default)]
    pub global_config: HostBootProfile,

    /// Per-host entries, in submission order
    #[serde(default)]
    pub configs: Vec<DeploymentEntry>,
}

/// Binds one MAC address to a boot configuration and host profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentEntry {
    /// Hardware address of the machine
    pub mac: String,

    /// Name of the `BootConfig` this host boots
    #[serde(alias = "deployment")]
    pub config_name: String,

    /// Host overrides of the global profile
    #[serde(default)]
    pub config: HostBootProfile,

    /// Boot configuration the name resolved to (set during resolution)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot_config: Option<BootConfig>,
}

impl DeploymentManifest {
    /// Finds the entry for `mac`, ignoring case.
    #[must_use]
    pub fn find_entry(&self, mac: &str) -> Option<&DeploymentEntry> {
        self.configs.iter().find(|entry| entry.matches_mac(mac))
    }

    /// Whether the manifest carries no host entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

impl DeploymentEntry {
    /// Case-insensitive comparison against this entry's MAC address.
    #[must_use]
    pub fn matches_mac(&self, mac: &str) -> bool {
        self.mac.eq_ignore_ascii_case(mac)
    }
}

/// Converts a MAC address into the form used in artifact paths.
///
/// Colons become dashes (friendlier for file systems and URLs) and the
/// address is lower-cased, matching iPXE's `${mac:hexhyp}` expansion.
#[must_use]
pub fn dashed_mac(mac: &str) -> String {
    mac.to_ascii_lowercase().replace(':', "-")
}

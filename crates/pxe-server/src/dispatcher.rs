//! Boot artifact dispatch.
//!
//! Renders the iPXE script and installer files for a resolved entry and
//! publishes them at paths derived from its MAC address:
//!
//! | Kind      | `.ipxe` | `.cfg`            | `.ks`          |
//! |-----------|---------|-------------------|----------------|
//! | preseed   | yes     | preseed file      |                |
//! | kickstart | yes     | kickstart file    |                |
//! | vsphere   | yes     | ESXi boot config  | ESXi kickstart |
//! | any-boot  | yes     |                   |                |

use crate::artifacts::{Artifact, ArtifactStore, Publication};
use crate::error::RenderError;
use crate::resolver::{BootCatalog, ResolvedEntry};
use crate::templates::{installer, ipxe};
use deployment_types::{ProfileKind, dashed_mac};
use tracing::{debug, warn};

/// Renders and publishes boot artifacts for one server address.
#[derive(Debug, Clone)]
pub struct BootArtifactDispatcher {
    http_address: String,
}

impl BootArtifactDispatcher {
    /// `http_address` is how booting machines reach this server.
    pub fn new(http_address: impl Into<String>) -> Self {
        Self {
            http_address: http_address.into(),
        }
    }

    /// Address rendered into artifact URLs.
    pub fn http_address(&self) -> &str {
        &self.http_address
    }

    /// Renders every artifact for `entry` without publishing anything.
    pub fn render(&self, entry: &ResolvedEntry) -> Result<Vec<Artifact>, RenderError> {
        let address = self.http_address.as_str();
        let mac = dashed_mac(&entry.mac);
        let boot = &entry.boot;
        let ssh_key = self.ssh_key(entry);
        let ssh_key = ssh_key.as_deref();

        let mut artifacts = Vec::with_capacity(3);
        match entry.kind {
            ProfileKind::Preseed => {
                debug!("Generating preseed ipxeConfig for [{}]", mac);
                artifacts.push(Artifact::new(
                    format!("/{mac}.ipxe"),
                    ipxe::preseed(address, &boot.kernel, &boot.initrd, &boot.cmdline)?,
                ));
                artifacts.push(Artifact::new(
                    format!("/{mac}.cfg"),
                    installer::preseed(&entry.host, ssh_key)?,
                ));
            }
            ProfileKind::Kickstart => {
                debug!("Generating kickstart ipxeConfig for [{}]", mac);
                artifacts.push(Artifact::new(
                    format!("/{mac}.ipxe"),
                    ipxe::kickstart(address, &boot.kernel, &boot.initrd, &boot.cmdline)?,
                ));
                artifacts.push(Artifact::new(
                    format!("/{mac}.cfg"),
                    installer::kickstart(&entry.host, ssh_key)?,
                ));
            }
            ProfileKind::Vsphere => {
                debug!("Generating vsphere ipxeConfig for [{}]", mac);
                artifacts.push(Artifact::new(
                    format!("/{mac}.ipxe"),
                    ipxe::vsphere(address, &boot.kernel, &boot.cmdline)?,
                ));
                artifacts.push(Artifact::new(
                    format!("/{mac}.cfg"),
                    installer::esxi_config(address, &mac, &entry.host),
                ));
                artifacts.push(Artifact::new(
                    format!("/{mac}.ks"),
                    installer::esxi_kickstart(&entry.host, ssh_key)?,
                ));
            }
            ProfileKind::AnyBoot => {
                debug!("Building configuration for configName [{}]", entry.config_name);
                artifacts.push(Artifact::new(
                    format!("/{mac}.ipxe"),
                    ipxe::anyboot(address, &boot.kernel, &boot.initrd, &boot.cmdline)?,
                ));
            }
        }
        Ok(artifacts)
    }

    /// Renders and publishes the artifacts for `entry`.
    pub fn publish(
        &self,
        entry: &ResolvedEntry,
        store: &ArtifactStore,
    ) -> Result<Vec<Publication>, RenderError> {
        let artifacts = self.render(entry)?;
        Ok(store.publish_all(artifacts))
    }

    /// Renders the per-kind artifacts every machine can chain to
    /// (`/default.ipxe`, `/preseed.ipxe`, ...), plus `/reboot.ipxe`.
    pub fn render_boot_types(&self, catalog: &BootCatalog) -> Result<Vec<Artifact>, RenderError> {
        let address = self.http_address.as_str();
        let mut artifacts = Vec::new();

        match catalog.find("default") {
            Some(config) => artifacts.push(Artifact::new(
                "/default.ipxe",
                ipxe::preseed(address, &config.kernel, &config.initrd, &config.cmdline)?,
            )),
            None => warn!(
                "Found [{}] configurations and no \"default\" configuration",
                catalog.len()
            ),
        }
        if let Some(config) = catalog.find("preseed") {
            artifacts.push(Artifact::new(
                "/preseed.ipxe",
                ipxe::preseed(address, &config.kernel, &config.initrd, &config.cmdline)?,
            ));
        }
        if let Some(config) = catalog.find("kickstart") {
            artifacts.push(Artifact::new(
                "/kickstart.ipxe",
                ipxe::kickstart(address, &config.kernel, &config.initrd, &config.cmdline)?,
            ));
        }
        if let Some(config) = catalog.find("vsphere") {
            artifacts.push(Artifact::new(
                "/vsphere.ipxe",
                ipxe::vsphere(address, &config.kernel, &config.cmdline)?,
            ));
        }
        artifacts.push(Artifact::new("/reboot.ipxe", ipxe::reboot()));
        Ok(artifacts)
    }

    fn ssh_key(&self, entry: &ResolvedEntry) -> Option<String> {
        match entry.host.read_ssh_key() {
            Ok(key) => key,
            Err(e) => {
                warn!(
                    "Unable to read SSH key [{}] for [{}], continuing without it: {}",
                    entry.host.ssh_key_path, entry.mac, e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deployment_types::{BootConfig, HostBootProfile};

    fn entry(kind: ProfileKind) -> ResolvedEntry {
        ResolvedEntry {
            mac: "AA:BB:CC:DD:EE:FF".to_string(),
            config_name: kind.as_str().to_string(),
            kind,
            boot: BootConfig {
                config_name: kind.as_str().to_string(),
                kernel: "kernel".to_string(),
                initrd: "initrd".to_string(),
                cmdline: String::new(),
            },
            host: HostBootProfile {
                repository_address: "10.0.0.2".to_string(),
                mirror_directory: "/ubuntu".to_string(),
                password: "secret".to_string(),
                ..HostBootProfile::default()
            },
        }
    }

    fn paths(artifacts: &[Artifact]) -> Vec<&str> {
        artifacts.iter().map(|a| a.path.as_str()).collect()
    }

    #[test]
    fn test_paths_per_kind() {
        let dispatcher = BootArtifactDispatcher::new("10.0.0.1");
        let render = |kind| dispatcher.render(&entry(kind)).expect("Failed to render");

        assert_eq!(
            paths(&render(ProfileKind::Preseed)),
            vec!["/aa-bb-cc-dd-ee-ff.ipxe", "/aa-bb-cc-dd-ee-ff.cfg"]
        );
        assert_eq!(
            paths(&render(ProfileKind::Kickstart)),
            vec!["/aa-bb-cc-dd-ee-ff.ipxe", "/aa-bb-cc-dd-ee-ff.cfg"]
        );
        assert_eq!(
            paths(&render(ProfileKind::Vsphere)),
            vec!["/aa-bb-cc-dd-ee-ff.ipxe", "/aa-bb-cc-dd-ee-ff.cfg", "/aa-bb-cc-dd-ee-ff.ks"]
        );
        assert_eq!(paths(&render(ProfileKind::AnyBoot)), vec!["/aa-bb-cc-dd-ee-ff.ipxe"]);
    }

    #[test]
    fn test_vsphere_kickstart_artifact_carries_kickstart() {
        let dispatcher = BootArtifactDispatcher::new("10.0.0.1");
        let artifacts = dispatcher.render(&entry(ProfileKind::Vsphere)).expect("Failed to render");
        assert!(!artifacts[0].content.contains("initrd"));
        assert!(artifacts[1].content.contains("kernelopt=ks=http://10.0.0.1/aa-bb-cc-dd-ee-ff.ks"));
        assert!(artifacts[2].content.starts_with("vmaccepteula\n"));
    }

    #[test]
    fn test_render_error_from_incomplete_profile() {
        let dispatcher = BootArtifactDispatcher::new("10.0.0.1");
        let mut incomplete = entry(ProfileKind::Preseed);
        incomplete.host.repository_address.clear();
        assert!(dispatcher.render(&incomplete).is_err());
    }

    #[test]
    fn test_unreadable_ssh_key_is_skipped() {
        let dispatcher = BootArtifactDispatcher::new("10.0.0.1");
        let mut with_key = entry(ProfileKind::Preseed);
        with_key.host.ssh_key_path = "/nonexistent/id_rsa.pub".to_string();
        let artifacts = dispatcher.render(&with_key).expect("Missing key should not fail rendering");
        assert!(!artifacts[1].content.contains("authorized_keys"));
    }

    #[test]
    fn test_publish_into_store() {
        let dispatcher = BootArtifactDispatcher::new("10.0.0.1");
        let store = ArtifactStore::new();
        let results = dispatcher
            .publish(&entry(ProfileKind::Kickstart), &store)
            .expect("Failed to publish");
        assert_eq!(results, vec![Publication::Registered, Publication::Registered]);
        assert!(store.get("/aa-bb-cc-dd-ee-ff.cfg").is_some());
    }

    #[test]
    fn test_render_boot_types() {
        let dispatcher = BootArtifactDispatcher::new("10.0.0.1");
        let catalog = BootCatalog::new(vec![
            BootConfig {
                config_name: "default".to_string(),
                kernel: "k".to_string(),
                ..BootConfig::default()
            },
            BootConfig {
                config_name: "vsphere".to_string(),
                kernel: "mboot.c32".to_string(),
                ..BootConfig::default()
            },
        ]);
        let artifacts = dispatcher.render_boot_types(&catalog).expect("Failed to render");
        assert_eq!(paths(&artifacts), vec!["/default.ipxe", "/vsphere.ipxe", "/reboot.ipxe"]);
    }
}

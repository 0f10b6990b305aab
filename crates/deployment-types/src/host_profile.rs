//! Host boot profile
//!
//! Per-host settings rendered into installer answer files. Any field left
//! empty on a host inherits the value from the manifest's global profile.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Installer settings for one host, or the defaults hosts inherit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostBootProfile {
    // Host identity, never inherited
    /// Static address assigned to the host
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,

    /// Hostname written by the installer
    #[serde(skip_serializing_if = "String::is_empty")]
    pub server_name: String,

    // Network
    /// Default gateway
    #[serde(skip_serializing_if = "String::is_empty")]
    pub gateway: String,

    /// Subnet mask
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subnet: String,

    /// DNS server
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name_server: String,

    /// Network adapter the installer configures
    #[serde(skip_serializing_if = "String::is_empty")]
    pub adapter: String,

    // Repository
    /// Package mirror host
    #[serde(skip_serializing_if = "String::is_empty")]
    pub repository_address: String,

    /// Directory on the mirror (typically /ubuntu)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mirror_directory: String,

    // Users
    /// Initial user created by the installer
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,

    /// Password for the initial user
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,

    /// Path to a public key installed for the initial user
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ssh_key_path: String,

    /// Space separated package selection
    #[serde(skip_serializing_if = "String::is_empty")]
    pub packages: String,
}

fn inherit(field: &mut String, global: &str) {
    if field.is_empty() {
        global.clone_into(field);
    }
}

impl HostBootProfile {
    /// Fills every empty inheritable field from `global`.
    ///
    /// Host values that are already set are left untouched, and `address`
    /// and `server_name` are host specific so they never inherit.
    pub fn inherit_from(&mut self, global: &HostBootProfile) {
        inherit(&mut self.gateway, &global.gateway);
        inherit(&mut self.subnet, &global.subnet);
        inherit(&mut self.name_server, &global.name_server);
        inherit(&mut self.adapter, &global.adapter);

        inherit(&mut self.repository_address, &global.repository_address);
        inherit(&mut self.mirror_directory, &global.mirror_directory);

        inherit(&mut self.username, &global.username);
        inherit(&mut self.password, &global.password);
        inherit(&mut self.ssh_key_path, &global.ssh_key_path);

        inherit(&mut self.packages, &global.packages);
    }

    /// Reads the public key referenced by `ssh_key_path`.
    ///
    /// Returns `Ok(None)` when no key path is configured. Trailing line
    /// endings are stripped so the key can be inlined on a single line.
    pub fn read_ssh_key(&self) -> io::Result<Option<String>> {
        if self.ssh_key_path.is_empty() {
            return Ok(None);
        }
        let buffer = std::fs::read_to_string(Path::new(&self.ssh_key_path))?;
        Ok(Some(buffer.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global() -> HostBootProfile {
        HostBootProfile {
            address: "10.0.0.1".to_string(),
            server_name: "global".to_string(),
            gateway: "10.0.0.254".to_string(),
            subnet: "255.255.255.0".to_string(),
            name_server: "8.8.8.8".to_string(),
            adapter: "ens160".to_string(),
            repository_address: "10.0.0.2".to_string(),
            mirror_directory: "/ubuntu".to_string(),
            username: "deploy".to_string(),
            password: "secret".to_string(),
            ssh_key_path: "/root/.ssh/id_rsa.pub".to_string(),
            packages: "openssh-server".to_string(),
        }
    }

    #[test]
    fn test_inherit_fills_every_empty_field() {
        let mut host = HostBootProfile::default();
        host.inherit_from(&global());

        let expected = HostBootProfile {
            address: String::new(),
            server_name: String::new(),
            ..global()
        };
        assert_eq!(host, expected, "Empty host fields should take global values");
    }

    #[test]
    fn test_inherit_preserves_host_values() {
        let mut host = HostBootProfile {
            gateway: "192.168.1.1".to_string(),
            username: "admin".to_string(),
            packages: "docker.io".to_string(),
            ..HostBootProfile::default()
        };
        host.inherit_from(&global());

        assert_eq!(host.gateway, "192.168.1.1");
        assert_eq!(host.username, "admin");
        assert_eq!(host.packages, "docker.io");
        assert_eq!(host.subnet, "255.255.255.0", "Unset fields still inherit");
    }

    #[test]
    fn test_inherit_never_copies_host_identity() {
        let mut host = HostBootProfile::default();
        host.inherit_from(&global());
        assert!(host.address.is_empty());
        assert!(host.server_name.is_empty());
    }

    #[test]
    fn test_inherit_is_stable_when_applied_twice() {
        let mut host = HostBootProfile {
            name_server: "1.1.1.1".to_string(),
            ..HostBootProfile::default()
        };
        host.inherit_from(&global());
        let once = host.clone();

        let other_global = HostBootProfile {
            gateway: "172.16.0.1".to_string(),
            ..HostBootProfile::default()
        };
        host.inherit_from(&other_global);
        assert_eq!(host, once, "Values present after inheritance are never overwritten");
    }

    #[test]
    fn test_read_ssh_key_strips_line_endings() {
        let path = std::env::temp_dir().join(format!("host-profile-key-{}.pub", std::process::id()));
        std::fs::write(&path, "ssh-ed25519 AAAAC3Nza deploy@lab\r\n").expect("Failed to write key");

        let host = HostBootProfile {
            ssh_key_path: path.to_string_lossy().into_owned(),
            ..HostBootProfile::default()
        };
        let key = host.read_ssh_key().expect("Failed to read key");
        std::fs::remove_file(&path).ok();

        assert_eq!(key.as_deref(), Some("ssh-ed25519 AAAAC3Nza deploy@lab"));
    }

    #[test]
    fn test_read_ssh_key_without_path() {
        let key = HostBootProfile::default().read_ssh_key().expect("No path is not an error");
        assert!(key.is_none());
    }

    #[test]
    fn test_profile_from_yaml() {
        let host: HostBootProfile = serde_yaml::from_str(
            "gateway: 10.0.0.254\nnameServer: 10.0.0.53\nmirrorDirectory: /ubuntu\n",
        )
        .expect("Failed to parse profile");
        assert_eq!(host.gateway, "10.0.0.254");
        assert_eq!(host.name_server, "10.0.0.53");
        assert_eq!(host.mirror_directory, "/ubuntu");
        assert!(host.password.is_empty());
    }
}

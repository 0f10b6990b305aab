//! Boot configurations
//!
//! Defines boot configurations (kernel, initrd, cmdline) and the profile
//! kind a configuration name selects.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Name a host resolves to when any-boot mode is enabled.
pub const ANYBOOT: &str = "anyboot";

/// Kernel, initrd and command line a machine boots with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootConfig {
    /// Name deployment entries use to reference this configuration
    pub config_name: String,

    /// Kernel image path (relative to the HTTP document root)
    pub kernel: String,

    /// Initrd image path
    #[serde(default)]
    pub initrd: String,

    /// Kernel command-line parameters
    #[serde(default)]
    pub cmdline: String,
}

/// The installer template family a host is provisioned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    /// Debian/Ubuntu preseed installer
    Preseed,

    /// RedHat/CentOS kickstart installer
    Kickstart,

    /// VMware ESXi installer
    Vsphere,

    /// Boot the referenced kernel/initrd/cmdline with no installer config
    AnyBoot,
}

impl ProfileKind {
    /// Classifies a boot configuration name.
    ///
    /// Operators may define their own configuration names, so anything that
    /// is not one of the installer families boots through the generic
    /// any-boot path instead of failing.
    #[must_use]
    pub fn from_config_name(name: &str) -> Self {
        match name {
            "preseed" => Self::Preseed,
            "kickstart" => Self::Kickstart,
            "vsphere" => Self::Vsphere,
            "default" | ANYBOOT => Self::AnyBoot,
            other => {
                debug!("Config name [{}] is not an installer profile, using any-boot", other);
                Self::AnyBoot
            }
        }
    }

    /// Canonical lowercase name of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preseed => "preseed",
            Self::Kickstart => "kickstart",
            Self::Vsphere => "vsphere",
            Self::AnyBoot => ANYBOOT,
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_kind_known_names() {
        assert_eq!(ProfileKind::from_config_name("preseed"), ProfileKind::Preseed);
        assert_eq!(ProfileKind::from_config_name("kickstart"), ProfileKind::Kickstart);
        assert_eq!(ProfileKind::from_config_name("vsphere"), ProfileKind::Vsphere);
        assert_eq!(ProfileKind::from_config_name("default"), ProfileKind::AnyBoot);
    }

    #[test]
    fn test_profile_kind_custom_name_falls_back() {
        assert_eq!(
            ProfileKind::from_config_name("ubuntu-22.04-lab"),
            ProfileKind::AnyBoot,
            "Unrecognized names should use the any-boot path"
        );
        // Matching is exact, operators' casing is not normalized
        assert_eq!(ProfileKind::from_config_name("Preseed"), ProfileKind::AnyBoot);
    }

    #[test]
    fn test_boot_config_defaults_optional_fields() {
        let config: BootConfig = serde_json::from_str(
            r#"{"configName": "vsphere", "kernel": "esxi/mboot.c32"}"#,
        )
        .expect("Failed to parse boot config");
        assert_eq!(config.initrd, "");
        assert_eq!(config.cmdline, "");
    }
}

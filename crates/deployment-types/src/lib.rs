//! Deployment Types
//!
//! Data model shared by the provisioning control plane:
//! - `BootConfig`: named kernel/initrd/cmdline sets (the boot catalog)
//! - `ProfileKind`: closed set of installer templates a host boots into
//! - `HostBootProfile`: per-host network, repository and identity settings
//! - `DeploymentManifest`: global defaults plus ordered per-MAC entries

pub mod boot_profile;
pub mod deployment;
pub mod host_profile;

pub use boot_profile::*;
pub use deployment::*;
pub use host_profile::*;

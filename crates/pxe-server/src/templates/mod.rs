//! Text templates for boot-time artifacts.
//!
//! - `ipxe`: boot-loader scripts pointing a machine at kernel/initrd/cmdline
//! - `installer`: unattended installer answer files (preseed, kickstart, ESXi)
//!
//! All templates are pure functions of their arguments.

pub mod installer;
pub mod ipxe;

use crate::error::RenderError;

pub(crate) fn require(
    value: &str,
    template: &'static str,
    field: &'static str,
) -> Result<(), RenderError> {
    if value.trim().is_empty() {
        return Err(RenderError::MissingField { template, field });
    }
    Ok(())
}

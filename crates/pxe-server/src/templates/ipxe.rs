//! iPXE boot-loader scripts.
//!
//! `address` is the host (and optional port) of this server as reachable by
//! booting machines. Kernel and initrd paths are relative to the server's
//! document root. Installer answer files are fetched back from this server
//! using iPXE's `${mac:hexhyp}` expansion, which matches the dashed MAC
//! paths artifacts are published under.

use super::require;
use crate::error::RenderError;

const BANNER: &str = "#!ipxe
dhcp
echo +--------------------- Provisioning ----------------------
echo | hostname: ${hostname}, next-server: ${next-server}
echo | address.: ${net0/ip}
echo | mac.....: ${net0/mac}
echo | gateway.: ${net0/gateway}
echo +---------------------------------------------------------
echo .
";

fn kernel_line(address: &str, kernel: &str, args: &str, cmdline: &str) -> String {
    let kernel = format!("kernel http://{address}/{kernel}");
    [kernel.as_str(), args, cmdline.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn script(kernel: String, initrd: Option<String>) -> String {
    let mut script = String::from(BANNER);
    script.push_str(&kernel);
    script.push('\n');
    if let Some(initrd) = initrd {
        script.push_str(&initrd);
        script.push('\n');
    }
    script.push_str("boot\n");
    script
}

/// Script booting a Debian/Ubuntu installer driven by a preseed file.
pub fn preseed(address: &str, kernel: &str, initrd: &str, cmdline: &str) -> Result<String, RenderError> {
    require(kernel, "preseed iPXE", "kernel")?;
    let args = format!("auto=true url=http://{address}/${{mac:hexhyp}}.cfg priority=critical");
    Ok(script(
        kernel_line(address, kernel, &args, cmdline),
        Some(format!("initrd http://{address}/{initrd}")),
    ))
}

/// Script booting a RedHat/CentOS installer driven by a kickstart file.
pub fn kickstart(address: &str, kernel: &str, initrd: &str, cmdline: &str) -> Result<String, RenderError> {
    require(kernel, "kickstart iPXE", "kernel")?;
    let args = format!("ks=http://{address}/${{mac:hexhyp}}.cfg");
    Ok(script(
        kernel_line(address, kernel, &args, cmdline),
        Some(format!("initrd http://{address}/{initrd}")),
    ))
}

/// Script chaining the ESXi boot loader. ESXi images are self-contained so
/// there is no initrd line.
pub fn vsphere(address: &str, kernel: &str, cmdline: &str) -> Result<String, RenderError> {
    require(kernel, "vsphere iPXE", "kernel")?;
    let args = format!("-c http://{address}/${{mac:hexhyp}}.cfg");
    Ok(script(kernel_line(address, kernel, &args, cmdline), None))
}

/// Script booting whatever kernel/initrd/cmdline was configured, with no
/// installer configuration.
pub fn anyboot(address: &str, kernel: &str, initrd: &str, cmdline: &str) -> Result<String, RenderError> {
    require(kernel, "any-boot iPXE", "kernel")?;
    let initrd = (!initrd.is_empty()).then(|| format!("initrd http://{address}/{initrd}"));
    Ok(script(kernel_line(address, kernel, "", cmdline), initrd))
}

/// Script that reboots the machine.
#[must_use]
pub fn reboot() -> String {
    "#!ipxe\necho Rebooting in 5 seconds\nsleep 5\nreboot\n".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preseed_script() {
        let script = preseed("10.0.0.1", "ubuntu/linux", "ubuntu/initrd.gz", "vga=788")
            .expect("Failed to render");
        assert!(script.starts_with("#!ipxe\ndhcp\n"));
        assert!(script.contains(
            "kernel http://10.0.0.1/ubuntu/linux auto=true url=http://10.0.0.1/${mac:hexhyp}.cfg priority=critical vga=788\n"
        ));
        assert!(script.contains("initrd http://10.0.0.1/ubuntu/initrd.gz\n"));
        assert!(script.ends_with("boot\n"));
    }

    #[test]
    fn test_kickstart_script() {
        let script = kickstart("10.0.0.1", "centos/vmlinuz", "centos/initrd.img", "")
            .expect("Failed to render");
        assert!(script.contains("kernel http://10.0.0.1/centos/vmlinuz ks=http://10.0.0.1/${mac:hexhyp}.cfg\n"));
        assert!(script.contains("initrd http://10.0.0.1/centos/initrd.img\n"));
    }

    #[test]
    fn test_vsphere_script_has_no_initrd() {
        let script = vsphere("10.0.0.1", "esxi/mboot.c32", "").expect("Failed to render");
        assert!(script.contains("kernel http://10.0.0.1/esxi/mboot.c32 -c http://10.0.0.1/${mac:hexhyp}.cfg\n"));
        assert!(!script.contains("initrd"));
    }

    #[test]
    fn test_anyboot_script() {
        let script = anyboot("10.0.0.1", "k", "i", "console=ttyS0").expect("Failed to render");
        assert!(script.contains("kernel http://10.0.0.1/k console=ttyS0\n"));
        assert!(script.contains("initrd http://10.0.0.1/i\n"));

        let no_initrd = anyboot("10.0.0.1", "k", "", "").expect("Failed to render");
        assert!(no_initrd.contains("kernel http://10.0.0.1/k\n"));
        assert!(!no_initrd.contains("initrd"));
    }

    #[test]
    fn test_missing_kernel() {
        assert_eq!(
            preseed("10.0.0.1", "", "initrd", ""),
            Err(RenderError::MissingField { template: "preseed iPXE", field: "kernel" })
        );
    }
}

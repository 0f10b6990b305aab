//! Installer answer files.
//!
//! Rendered from a host profile after inheritance from the global profile,
//! so every field a template needs should already be present.

use super::require;
use crate::error::RenderError;
use deployment_types::HostBootProfile;

fn network_line(host: &HostBootProfile) -> String {
    let device = if host.adapter.is_empty() { "link" } else { &host.adapter };
    if host.address.is_empty() {
        return format!("network --bootproto=dhcp --device={device}");
    }
    let mut line = format!(
        "network --bootproto=static --device={device} --ip={} --netmask={} --gateway={} --nameserver={}",
        host.address, host.subnet, host.gateway, host.name_server
    );
    if !host.server_name.is_empty() {
        line.push_str(&format!(" --hostname={}", host.server_name));
    }
    line
}

/// Debian/Ubuntu preseed file.
pub fn preseed(host: &HostBootProfile, ssh_key: Option<&str>) -> Result<String, RenderError> {
    require(&host.repository_address, "preseed", "repositoryAddress")?;
    require(&host.mirror_directory, "preseed", "mirrorDirectory")?;

    let adapter = if host.adapter.is_empty() { "auto" } else { &host.adapter };
    let mut lines = vec![
        "d-i debian-installer/locale string en_US".to_string(),
        "d-i keyboard-configuration/xkb-keymap select us".to_string(),
        format!("d-i netcfg/choose_interface select {adapter}"),
    ];

    if !host.address.is_empty() {
        lines.extend([
            "d-i netcfg/disable_autoconfig boolean true".to_string(),
            format!("d-i netcfg/get_ipaddress string {}", host.address),
            format!("d-i netcfg/get_netmask string {}", host.subnet),
            format!("d-i netcfg/get_gateway string {}", host.gateway),
            format!("d-i netcfg/get_nameservers string {}", host.name_server),
            "d-i netcfg/confirm_static boolean true".to_string(),
        ]);
    }
    if !host.server_name.is_empty() {
        lines.push(format!("d-i netcfg/get_hostname string {}", host.server_name));
        lines.push(format!("d-i netcfg/hostname string {}", host.server_name));
    }

    lines.extend([
        "d-i mirror/country string manual".to_string(),
        format!("d-i mirror/http/hostname string {}", host.repository_address),
        format!("d-i mirror/http/directory string {}", host.mirror_directory),
        "d-i mirror/http/proxy string".to_string(),
        "d-i passwd/root-login boolean false".to_string(),
        format!("d-i passwd/user-fullname string {}", host.username),
        format!("d-i passwd/username string {}", host.username),
        format!("d-i passwd/user-password password {}", host.password),
        format!("d-i passwd/user-password-again password {}", host.password),
        "d-i user-setup/allow-password-weak boolean true".to_string(),
        "d-i clock-setup/utc boolean true".to_string(),
        "d-i time/zone string UTC".to_string(),
        "d-i partman-auto/method string lvm".to_string(),
        "d-i partman-lvm/device_remove_lvm boolean true".to_string(),
        "d-i partman-lvm/confirm boolean true".to_string(),
        "d-i partman-lvm/confirm_nooverwrite boolean true".to_string(),
        "d-i partman-auto/choose_recipe select atomic".to_string(),
        "d-i partman/confirm_write_new_label boolean true".to_string(),
        "d-i partman/choose_partition select finish".to_string(),
        "d-i partman/confirm boolean true".to_string(),
        "d-i partman/confirm_nooverwrite boolean true".to_string(),
        format!("d-i pkgsel/include string {}", host.packages),
        "d-i grub-installer/only_debian boolean true".to_string(),
        "d-i finish-install/reboot_in_progress note".to_string(),
    ]);

    if let Some(key) = ssh_key {
        let home = format!("/home/{}", host.username);
        lines.push(format!(
            "d-i preseed/late_command string in-target mkdir -p {home}/.ssh; \
             in-target /bin/sh -c \"echo '{key}' >> {home}/.ssh/authorized_keys\"; \
             in-target chown -R {user}:{user} {home}/.ssh",
            user = host.username
        ));
    }

    Ok(lines.join("\n") + "\n")
}

/// RedHat/CentOS kickstart file.
pub fn kickstart(host: &HostBootProfile, ssh_key: Option<&str>) -> Result<String, RenderError> {
    require(&host.repository_address, "kickstart", "repositoryAddress")?;

    let mut lines = vec![
        "install".to_string(),
        format!("url --url=http://{}{}", host.repository_address, host.mirror_directory),
        "lang en_US.UTF-8".to_string(),
        "keyboard us".to_string(),
        network_line(host),
        "rootpw --lock".to_string(),
    ];
    if !host.username.is_empty() {
        lines.push(format!(
            "user --name={} --password={} --groups=wheel",
            host.username, host.password
        ));
        if let Some(key) = ssh_key {
            lines.push(format!("sshkey --username={} \"{key}\"", host.username));
        }
    }
    lines.extend([
        "timezone UTC --isUtc".to_string(),
        "bootloader --location=mbr".to_string(),
        "clearpart --all --initlabel".to_string(),
        "autopart".to_string(),
        "reboot".to_string(),
        "%packages".to_string(),
        "@core".to_string(),
    ]);
    lines.extend(host.packages.split_whitespace().map(str::to_string));
    lines.push("%end".to_string());

    Ok(lines.join("\n") + "\n")
}

/// ESXi boot loader configuration pointing the installer at its kickstart.
#[must_use]
pub fn esxi_config(address: &str, dashed_mac: &str, host: &HostBootProfile) -> String {
    let title = if host.server_name.is_empty() {
        "Loading ESXi installer".to_string()
    } else {
        format!("Loading ESXi installer for {}", host.server_name)
    };
    format!(
        "bootstate=0\ntitle={title}\ntimeout=5\nkernel=/b.b00\nkernelopt=ks=http://{address}/{dashed_mac}.ks\nbuild=\nupdated=0\n"
    )
}

/// ESXi kickstart script.
pub fn esxi_kickstart(host: &HostBootProfile, ssh_key: Option<&str>) -> Result<String, RenderError> {
    require(&host.password, "ESXi kickstart", "password")?;

    let mut lines = vec![
        "vmaccepteula".to_string(),
        format!("rootpw {}", host.password),
        "install --firstdisk --overwritevmfs".to_string(),
        network_line(host).replace("--device=link", "--device=vmnic0"),
        "reboot".to_string(),
    ];
    if let Some(key) = ssh_key {
        lines.extend([
            "%firstboot --interpreter=busybox".to_string(),
            format!("echo '{key}' >> /etc/ssh/keys-root/authorized_keys"),
            "vim-cmd hostsvc/enable_ssh".to_string(),
            "vim-cmd hostsvc/start_ssh".to_string(),
        ]);
    }

    Ok(lines.join("\n") + "\n")
}

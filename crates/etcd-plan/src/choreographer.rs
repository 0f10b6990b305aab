//! Certificate choreography for a three member etcd cluster.
//!
//! All certificates are issued on the node holding the CA. Members are
//! processed in reverse declaration order: the bundles for members three and
//! two are archived and downloaded for distribution, while member one is
//! processed last so its certificates are already in place and never need
//! to be transferred.

use crate::action::Action;
use crate::kubeadm;
use crate::topology::EtcdTopology;
use tracing::debug;

const SUDO_USER: &str = "root";
const PKI_DIR: &str = "/etc/kubernetes/pki";

/// Certificates issued for every member, as (kubeadm phase, description).
const CERTIFICATE_PHASES: [(&str, &str); 4] = [
    ("etcd-server", "etcd server certificate"),
    ("etcd-peer", "peer certificate"),
    ("etcd-healthcheck-client", "health check certificate"),
    ("apiserver-etcd-client", "api-server client certificate"),
];

fn working_dir(address: &str) -> String {
    format!("/tmp/{address}/")
}

fn config_path(address: &str) -> String {
    format!("/tmp/{address}/kubeadmcfg.yaml")
}

fn bundle_path(address: &str) -> String {
    format!("/tmp/{address}.tar.gz")
}

/// Every generated file under the PKI directory except the CA pair.
fn generated_certificates() -> String {
    format!("{PKI_DIR} -not -name ca.crt -not -name ca.key -type f")
}

/// Builds the complete, ordered action plan for `topology`.
///
/// Never fails: an empty hostname or address only produces malformed
/// commands, call [`EtcdTopology::validate`] first.
#[must_use]
pub fn plan(topology: &EtcdTopology) -> Vec<Action> {
    let mut actions = Vec::new();

    if topology.init_ca {
        actions.push(Action::sudo_command(
            "Initialise Certificate Authority",
            "kubeadm init phase certs etcd-ca",
            SUDO_USER,
        ));
    }

    let addresses = topology.addresses();
    let dirs = addresses.map(working_dir).join(" ");
    actions.push(Action::command(
        "Generate temporary directories",
        format!("mkdir -p {dirs}"),
    ));

    let api_version = topology.effective_api_version();
    for (index, (hostname, address)) in topology.members().enumerate() {
        let config = kubeadm::render(api_version, hostname, address, topology);
        actions.push(Action::command(
            format!("build kubeadm config for node {index}"),
            format!("echo '{config}' > {}", config_path(address)),
        ));
    }

    let [first, second, third] = addresses;
    actions.extend(certificate_actions(&[third, second, first]));

    debug!(actions = actions.len(), init_ca = topology.init_ca, "Generated etcd bootstrap plan");
    actions
}

/// Certificate issuing steps for `hosts`, in the order given.
///
/// Every host except the last one also gets its bundle archived and
/// downloaded.
fn certificate_actions(hosts: &[&str]) -> Vec<Action> {
    let mut actions = Vec::new();

    for (i, host) in hosts.iter().enumerate() {
        actions.push(Action::sudo_command(
            "Remove any existing certificates before attempting to generate any new ones",
            format!("find {} -delete", generated_certificates()),
            SUDO_USER,
        ));

        for (phase, description) in CERTIFICATE_PHASES {
            actions.push(Action::sudo_command(
                format!("Generate {description} for [{host}]"),
                format!("kubeadm init phase certs {phase} --config={}", config_path(host)),
                SUDO_USER,
            ));
        }

        if i != hosts.len() - 1 {
            actions.push(Action::sudo_command(
                format!("Archive generated certificates [{host}]"),
                format!(
                    "tar -cvzf {} $(find {}) {}",
                    bundle_path(host),
                    generated_certificates(),
                    config_path(host)
                ),
                SUDO_USER,
            ));
            actions.push(Action::download(
                format!("Retrieve the certificate bundle for [{host}]"),
                bundle_path(host),
                bundle_path(host),
            ));
        }
    }
    actions
}

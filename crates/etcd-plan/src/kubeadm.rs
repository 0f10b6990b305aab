//! kubeadm configuration for a single etcd member.

use crate::topology::EtcdTopology;

const PEER_PORT: u16 = 2380;
const CLIENT_PORT: u16 = 2379;

/// Renders the kubeadm `ClusterConfiguration` fragment for one member.
///
/// The fragment declares a new three member cluster with all peer URLs and
/// the target's own listen/advertise URLs, and puts the target address in
/// the server and peer certificate SANs. `api_version` is used as given.
#[must_use]
pub fn render(api_version: &str, hostname: &str, address: &str, topology: &EtcdTopology) -> String {
    let initial_cluster = topology
        .members()
        .map(|(name, addr)| format!("{name}=https://{addr}:{PEER_PORT}"))
        .collect::<Vec<_>>()
        .join(",");

    format!(
        r#"apiVersion: "kubeadm.k8s.io/{api_version}"
kind: ClusterConfiguration
etcd:
    local:
        serverCertSANs:
        - "{address}"
        peerCertSANs:
        - "{address}"
        extraArgs:
            initial-cluster: {initial_cluster}
            initial-cluster-state: new
            name: {hostname}
            listen-peer-urls: https://{address}:{PEER_PORT}
            listen-client-urls: https://{address}:{CLIENT_PORT}
            advertise-client-urls: https://{address}:{CLIENT_PORT}
            initial-advertise-peer-urls: https://{address}:{PEER_PORT}"#
    )
}

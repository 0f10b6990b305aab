//! etcd cluster topology

use crate::error::TopologyError;
use serde::{Deserialize, Serialize};

/// kubeadm API version used when none is given (kubeadm < 1.12 configs).
pub const LEGACY_API_VERSION: &str = "v1beta1";

/// Members of a three node etcd cluster.
///
/// Hostnames and addresses pair up by position for the lifetime of a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtcdTopology {
    #[serde(default)]
    pub hostname1: String,
    #[serde(default)]
    pub hostname2: String,
    #[serde(default)]
    pub hostname3: String,

    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub address2: String,
    #[serde(default)]
    pub address3: String,

    /// Generate a new certificate authority before issuing certificates
    #[serde(default, rename = "initCA")]
    pub init_ca: bool,

    /// kubeadm config API version, empty means [`LEGACY_API_VERSION`]
    #[serde(default, alias = "apiversion")]
    pub api_version: String,
}

impl EtcdTopology {
    /// Builds a topology from positional hostnames and addresses.
    pub fn new<H, A>(hostnames: [H; 3], addresses: [A; 3]) -> Self
    where
        H: Into<String>,
        A: Into<String>,
    {
        let [hostname1, hostname2, hostname3] = hostnames.map(Into::<String>::into);
        let [address1, address2, address3] = addresses.map(Into::<String>::into);
        Self {
            hostname1,
            hostname2,
            hostname3,
            address1,
            address2,
            address3,
            init_ca: false,
            api_version: String::new(),
        }
    }

    #[must_use]
    pub fn with_init_ca(mut self, init_ca: bool) -> Self {
        self.init_ca = init_ca;
        self
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Hostnames in declaration order.
    #[must_use]
    pub fn hostnames(&self) -> [&str; 3] {
        [&self.hostname1, &self.hostname2, &self.hostname3]
    }

    /// Addresses in declaration order.
    #[must_use]
    pub fn addresses(&self) -> [&str; 3] {
        [&self.address1, &self.address2, &self.address3]
    }

    /// (hostname, address) pairs in declaration order.
    pub fn members(&self) -> impl Iterator<Item = (&str, &str)> {
        self.hostnames().into_iter().zip(self.addresses())
    }

    /// The API version the plan renders with.
    #[must_use]
    pub fn effective_api_version(&self) -> &str {
        if self.api_version.is_empty() {
            LEGACY_API_VERSION
        } else {
            &self.api_version
        }
    }

    /// Checks the topology before a plan is generated from it.
    ///
    /// Planning itself never fails, an empty hostname or address would only
    /// surface as a broken remote command.
    pub fn validate(&self) -> Result<(), TopologyError> {
        for (index, (hostname, address)) in self.members().enumerate() {
            if hostname.trim().is_empty() {
                return Err(TopologyError::MissingHostname(index + 1));
            }
            if address.trim().is_empty() {
                return Err(TopologyError::MissingAddress(index + 1));
            }
        }

        let addresses = self.addresses();
        for (index, address) in addresses.iter().enumerate() {
            if addresses[index + 1..].contains(address) {
                return Err(TopologyError::DuplicateAddress((*address).to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topology() -> EtcdTopology {
        EtcdTopology::new(["h1", "h2", "h3"], ["a1", "a2", "a3"])
    }

    #[test]
    fn test_validate_accepts_distinct_members() {
        assert_eq!(topology().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let mut missing_host = topology();
        missing_host.hostname2 = String::new();
        assert_eq!(missing_host.validate(), Err(TopologyError::MissingHostname(2)));

        let mut missing_address = topology();
        missing_address.address3 = " ".to_string();
        assert_eq!(missing_address.validate(), Err(TopologyError::MissingAddress(3)));
    }

    #[test]
    fn test_validate_rejects_duplicate_addresses() {
        let duplicate = EtcdTopology::new(["h1", "h2", "h3"], ["a1", "a2", "a1"]);
        assert_eq!(
            duplicate.validate(),
            Err(TopologyError::DuplicateAddress("a1".to_string()))
        );
    }

    #[test]
    fn test_effective_api_version() {
        assert_eq!(topology().effective_api_version(), LEGACY_API_VERSION);
        assert_eq!(topology().with_api_version("v1beta3").effective_api_version(), "v1beta3");
    }

    #[test]
    fn test_wire_format() {
        let parsed: EtcdTopology = serde_json::from_str(
            r#"{"hostname1":"h1","hostname2":"h2","hostname3":"h3",
                "address1":"a1","address2":"a2","address3":"a3",
                "initCA":true,"apiversion":"v1beta2"}"#,
        )
        .expect("Failed to parse topology");
        assert_eq!(parsed, topology().with_init_ca(true).with_api_version("v1beta2"));
    }
}

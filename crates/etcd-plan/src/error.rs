//! etcd plan errors

use thiserror::Error;

/// Problems with a topology that would produce broken remote commands.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    /// Hostname for the given member (1-based) is empty
    #[error("hostname for member {0} is empty")]
    MissingHostname(usize),

    /// Address for the given member (1-based) is empty
    #[error("address for member {0} is empty")]
    MissingAddress(usize),

    /// Two members share an address
    #[error("address [{0}] is used by more than one member")]
    DuplicateAddress(String),
}

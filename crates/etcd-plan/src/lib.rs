//! etcd Bootstrap Plans
//!
//! Produces the ordered list of remote actions that stands up a three member
//! etcd cluster whose TLS material is issued by `kubeadm init phase certs`.
//!
//! The plan is pure data: executing it (over SSH or an agent), retrying and
//! reporting are the job of a separate executor. Actions must be run strictly
//! in order, every certificate step depends on the CA and on files written by
//! the steps before it.
//!
//! # Example
//!
//! ```
//! use etcd_plan::{plan, EtcdTopology};
//!
//! let topology = EtcdTopology::new(
//!     ["etcd01", "etcd02", "etcd03"],
//!     ["10.0.0.11", "10.0.0.12", "10.0.0.13"],
//! );
//! topology.validate()?;
//!
//! let actions = plan(&topology);
//! assert_eq!(actions[0].name, "Generate temporary directories");
//! # Ok::<(), etcd_plan::TopologyError>(())
//! ```

pub mod action;
pub mod choreographer;
pub mod error;
pub mod kubeadm;
pub mod topology;

pub use action::{Action, ActionKind};
pub use choreographer::plan;
pub use error::TopologyError;
pub use kubeadm::render as render_kubeadm;
pub use topology::{EtcdTopology, LEGACY_API_VERSION};

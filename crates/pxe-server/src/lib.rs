//! PXE Boot Server
//!
//! Deployment resolution and boot artifact serving for bare-metal
//! provisioning, built on `axum`.
//!
//! This crate provides:
//! - Resolution of deployment manifests against a catalog of boot configs
//! - Rendering of iPXE scripts and installer answer files per host
//! - An in-memory artifact store served over HTTP at MAC-derived paths
//! - A deployment API for submitting manifests and looking up MACs
//! - An etcd bootstrap plan endpoint backed by `etcd-plan`
//!
//! # Update passes
//!
//! A manifest update resolves every entry, renders every artifact, then
//! publishes and swaps the registry. Any failure before publishing leaves
//! the previous configuration in place; an empty update is ignored.

pub mod api;
pub mod artifacts;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod registry;
pub mod resolver;
pub mod server;
pub mod service;
pub mod templates;

pub use artifacts::{Artifact, ArtifactStore, Publication};
pub use dispatcher::BootArtifactDispatcher;
pub use error::*;
pub use http::router;
pub use registry::{DeploymentRegistry, RegistrySnapshot};
pub use resolver::{BootCatalog, ResolvedEntry, ResolvedManifest, resolve};
pub use server::*;
pub use service::{DeploymentService, UpdateOutcome};

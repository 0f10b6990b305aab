//! Published boot artifacts.
//!
//! Process-wide path → content mapping served to booting machines. Paths are
//! not namespaced per manifest, the latest successful publication of a path
//! wins.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// A rendered artifact waiting to be published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Absolute URL path, e.g. `/aa-bb-cc-dd-ee-ff.ipxe`
    pub path: String,
    /// Body served at `path`
    pub content: String,
}

impl Artifact {
    /// Creates a new artifact for `path`.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// What publishing did to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publication {
    /// First publication, the path is now routed to the content handler
    Registered,
    /// The path was already routed, only its content changed
    Replaced,
    /// Empty content is never published
    Skipped,
}

/// Published artifacts keyed by URL path.
#[derive(Debug, Default)]
pub struct ArtifactStore {
    paths: RwLock<HashMap<String, Arc<str>>>,
}

impl ArtifactStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a single artifact.
    pub fn publish(&self, artifact: Artifact) -> Publication {
        let mut paths = self.paths.write().unwrap_or_else(PoisonError::into_inner);
        Self::insert(&mut paths, artifact)
    }

    /// Publishes a batch under one write guard so readers never see half of
    /// an update.
    pub fn publish_all(&self, artifacts: impl IntoIterator<Item = Artifact>) -> Vec<Publication> {
        let mut paths = self.paths.write().unwrap_or_else(PoisonError::into_inner);
        artifacts
            .into_iter()
            .map(|artifact| Self::insert(&mut paths, artifact))
            .collect()
    }

    fn insert(paths: &mut HashMap<String, Arc<str>>, artifact: Artifact) -> Publication {
        if artifact.content.is_empty() {
            return Publication::Skipped;
        }
        match paths.insert(artifact.path.clone(), Arc::from(artifact.content)) {
            None => {
                debug!("Registered handler for [{}]", artifact.path);
                Publication::Registered
            }
            Some(_) => {
                debug!("Replaced content of [{}]", artifact.path);
                Publication::Replaced
            }
        }
    }

    /// Content currently published at `path`.
    pub fn get(&self, path: &str) -> Option<Arc<str>> {
        self.paths
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// All routed paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<_> = self
            .paths
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        paths.sort();
        paths
    }

    /// Number of published paths.
    pub fn len(&self) -> usize {
        self.paths.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been published yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Documents: the clusters of one (document id, part id) unit.

use crate::cluster::CorefCluster;
use crate::mention::ClusterId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one document part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentKey {
    /// Document id.
    pub doc_id: String,
    /// Part (paragraph) id within the document.
    pub part_id: String,
}

impl DocumentKey {
    /// Create a key.
    #[must_use]
    pub fn new(doc_id: impl Into<String>, part_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            part_id: part_id.into(),
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.doc_id, self.part_id)
    }
}

/// The clusters of one document part, in first-seen order.
///
/// The document exclusively owns its clusters; a cluster removed here is
/// handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    key: DocumentKey,
    clusters: Vec<CorefCluster>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new(key: DocumentKey) -> Self {
        Self {
            key,
            clusters: Vec::new(),
        }
    }

    /// The document key.
    #[must_use]
    pub fn key(&self) -> &DocumentKey {
        &self.key
    }

    /// Clusters in order.
    #[must_use]
    pub fn clusters(&self) -> &[CorefCluster] {
        &self.clusters
    }

    /// Mutable access to the clusters.
    pub fn clusters_mut(&mut self) -> &mut [CorefCluster] {
        &mut self.clusters
    }

    /// Cluster ids in order.
    #[must_use]
    pub fn cluster_ids(&self) -> Vec<ClusterId> {
        self.clusters.iter().map(|c| c.id().clone()).collect()
    }

    /// Look up a cluster.
    #[must_use]
    pub fn get(&self, id: &ClusterId) -> Option<&CorefCluster> {
        self.clusters.iter().find(|c| c.id() == id)
    }

    /// Look up a cluster mutably.
    pub fn get_mut(&mut self, id: &ClusterId) -> Option<&mut CorefCluster> {
        self.clusters.iter_mut().find(|c| c.id() == id)
    }

    /// Whether a cluster with this id exists.
    #[must_use]
    pub fn contains(&self, id: &ClusterId) -> bool {
        self.get(id).is_some()
    }

    /// Return the cluster with this id, creating an empty one at the end.
    pub fn get_or_insert(&mut self, id: &ClusterId) -> &mut CorefCluster {
        let idx = match self.clusters.iter().position(|c| c.id() == id) {
            Some(idx) => idx,
            None => {
                self.clusters.push(CorefCluster::new(id.clone()));
                self.clusters.len() - 1
            }
        };
        &mut self.clusters[idx]
    }

    /// Remove a cluster and hand it back.
    pub fn remove(&mut self, id: &ClusterId) -> Option<CorefCluster> {
        let idx = self.clusters.iter().position(|c| c.id() == id)?;
        Some(self.clusters.remove(idx))
    }

    /// Drop clusters that no longer hold any group. Returns how many went.
    pub fn retain_non_empty(&mut self) -> usize {
        let before = self.clusters.len();
        self.clusters.retain(|c| !c.is_empty());
        before - self.clusters.len()
    }

    /// Total number of mentions.
    #[must_use]
    pub fn mention_count(&self) -> usize {
        self.clusters.iter().map(|c| c.mentions().len()).sum()
    }
}
